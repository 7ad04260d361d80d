//! Conway's Game of Life rules (B3/S23)

/// Fixed rule table for the classical Game of Life
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Neighbor counts that bring a dead cell to life
    pub const BIRTH: [usize; 1] = [3];

    /// Neighbor counts that keep a live cell alive; any other count kills it
    /// by underpopulation or overcrowding
    pub const SURVIVAL: [usize; 2] = [2, 3];

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: usize) -> bool {
        if current_state {
            Self::SURVIVAL.contains(&neighbor_count)
        } else {
            Self::BIRTH.contains(&neighbor_count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert!(GameOfLifeRules::should_be_alive(true, 2));
        assert!(GameOfLifeRules::should_be_alive(true, 3));
        assert!(GameOfLifeRules::should_be_alive(false, 3));
        assert!(!GameOfLifeRules::should_be_alive(true, 1));
        assert!(!GameOfLifeRules::should_be_alive(true, 4));
        assert!(!GameOfLifeRules::should_be_alive(false, 2));
        assert!(!GameOfLifeRules::should_be_alive(false, 4));
    }

    #[test]
    fn test_counts_past_moore_neighborhood() {
        assert!(!GameOfLifeRules::should_be_alive(true, 9));
        assert!(!GameOfLifeRules::should_be_alive(false, 9));
        assert!(!GameOfLifeRules::should_be_alive(false, 0));
    }
}

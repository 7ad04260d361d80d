//! Background production of successive generations

pub mod cancel;

pub use cancel::CancellationToken;

use crate::game_of_life::Universe;
use anyhow::{Context, Result};
use log::*;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long the producer waits before retrying a publish into a full buffer
const PUBLISH_RETRY_INTERVAL: Duration = Duration::from_millis(1);

const PRODUCER_THREAD_NAME: &str = "life-producer";

/// Drives repeated evolution of a universe on a background thread
#[derive(Debug, Clone, Default)]
pub struct Engine {
    generation_limit: Option<u64>,
}

enum Publish {
    Sent,
    Cancelled,
    Disconnected,
}

impl Engine {
    /// An engine that keeps producing until cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop producing after `limit` generations even if not cancelled
    pub fn with_generation_limit(mut self, limit: u64) -> Self {
        self.generation_limit = Some(limit);
        self
    }

    /// Start evolving `initial` and publish each new generation.
    ///
    /// Generations are pushed into a buffer holding at most `buffer_capacity`
    /// universes. When it is full the producer blocks until the consumer
    /// catches up or `cancellation` fires. The token is checked once per
    /// generation, so an evolution that already started is never cut short
    /// and a partial generation is never published. Once cancelled, nothing
    /// beyond what is already buffered reaches the consumer.
    ///
    /// Only fails if the operating system refuses to start the producer thread.
    pub fn run(
        &self,
        initial: Universe,
        cancellation: CancellationToken,
        buffer_capacity: usize,
    ) -> Result<Generations> {
        let (sender, receiver) = sync_channel(buffer_capacity);
        let token = cancellation.clone();
        let limit = self.generation_limit;

        debug!(
            "Starting engine for {}x{} universe (buffer: {}, limit: {:?})",
            initial.width(),
            initial.height(),
            buffer_capacity,
            limit
        );
        let producer = thread::Builder::new()
            .name(PRODUCER_THREAD_NAME.to_string())
            .spawn(move || produce(initial, sender, token, limit))
            .context("Failed to spawn generation producer thread")?;

        Ok(Generations {
            receiver,
            cancellation,
            producer: Some(producer),
        })
    }
}

fn produce(
    mut current: Universe,
    sender: SyncSender<Universe>,
    cancellation: CancellationToken,
    limit: Option<u64>,
) {
    let mut generation: u64 = 0;

    loop {
        if cancellation.is_cancelled() {
            debug!("Engine cancelled after {} generations", generation);
            break;
        }
        if limit.is_some_and(|limit| generation >= limit) {
            debug!("Engine reached its limit of {} generations", generation);
            break;
        }

        let evolved = current.evolve();
        generation += 1;
        trace!("Generation {} has {} living cells", generation, evolved.living_count());

        match publish(&sender, evolved.clone(), &cancellation) {
            Publish::Sent => current = evolved,
            Publish::Cancelled => {
                debug!("Engine cancelled while waiting for buffer space");
                break;
            }
            Publish::Disconnected => {
                debug!("Generation consumer disconnected, stopping engine");
                break;
            }
        }
    }
}

fn publish(
    sender: &SyncSender<Universe>,
    mut universe: Universe,
    cancellation: &CancellationToken,
) -> Publish {
    loop {
        if cancellation.is_cancelled() {
            return Publish::Cancelled;
        }
        match sender.try_send(universe) {
            Ok(()) => return Publish::Sent,
            Err(TrySendError::Full(returned)) => {
                universe = returned;
                thread::sleep(PUBLISH_RETRY_INTERVAL);
            }
            Err(TrySendError::Disconnected(_)) => return Publish::Disconnected,
        }
    }
}

/// The stream of generations produced by [`Engine::run`].
///
/// Yields each generation in order and ends once the producer has stopped.
/// Dropping it cancels the producer and waits for the thread to exit.
pub struct Generations {
    receiver: Receiver<Universe>,
    cancellation: CancellationToken,
    producer: Option<JoinHandle<()>>,
}

impl Generations {
    /// The token controlling this stream's producer
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Request the producer to stop; already buffered generations are still yielded
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }
}

impl Iterator for Generations {
    type Item = Universe;

    fn next(&mut self) -> Option<Universe> {
        self.receiver.recv().ok()
    }
}

impl Drop for Generations {
    fn drop(&mut self) {
        self.cancellation.cancel();
        if let Some(producer) = self.producer.take() {
            if producer.join().is_err() {
                warn!("Generation producer thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn random_universe() -> Universe {
        Universe::new_random(9, 9, &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_runs_until_cancellation() {
        let token = CancellationToken::new();
        let generations = Engine::new()
            .run(random_universe(), token.clone(), 10)
            .unwrap();

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            token.cancel();
        });

        let count = generations.count();
        canceller.join().unwrap();

        assert!(count >= 1, "expected at least one generation");
    }

    #[test]
    fn test_generations_are_in_order() {
        let initial = Universe::new_glider();
        let generations: Vec<Universe> = Engine::new()
            .with_generation_limit(8)
            .run(initial.clone(), CancellationToken::new(), 2)
            .unwrap()
            .collect();

        assert_eq!(generations.len(), 8);
        let mut expected = initial;
        for generation in &generations {
            expected = expected.evolve();
            assert_eq!(generation, &expected);
        }
    }

    #[test]
    fn test_pre_cancelled_token_yields_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let generations = Engine::new().run(random_universe(), token, 4).unwrap();
        assert_eq!(generations.count(), 0);
    }

    #[test]
    fn test_full_buffer_blocks_producer() {
        let generations = Engine::new()
            .run(random_universe(), CancellationToken::new(), 2)
            .unwrap();
        thread::sleep(Duration::from_millis(100));
        generations.cancel();

        let count = generations.count();
        assert!(count <= 2, "producer outran its buffer: {} generations", count);
        assert!(count >= 1);
    }

    #[test]
    fn test_waiting_generation_is_dropped_on_cancel() {
        let mut generations = Engine::new()
            .run(Universe::new_glider(), CancellationToken::new(), 1)
            .unwrap();
        // Let the producer fill the buffer and start waiting with generation 2
        thread::sleep(Duration::from_millis(100));
        generations.cancel();

        let first = generations.next().expect("buffered generation");
        assert_eq!(first, Universe::new_glider().evolve());
        // Freeing the slot must not let the waiting generation through
        assert!(generations.next().is_none());
    }

    #[test]
    fn test_cancel_unblocks_producer_promptly() {
        let mut generations = Engine::new()
            .run(random_universe(), CancellationToken::new(), 1)
            .unwrap();
        assert!(generations.next().is_some());

        let started = Instant::now();
        generations.cancel();
        while generations.next().is_some() {}
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_drop_cancels_producer() {
        let mut generations = Engine::new()
            .run(random_universe(), CancellationToken::new(), 3)
            .unwrap();
        let token = generations.cancellation().clone();
        assert!(generations.next().is_some());

        drop(generations);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_producer_thread_is_named() {
        let generations = Engine::new()
            .with_generation_limit(1)
            .run(Universe::new_glider(), CancellationToken::new(), 1)
            .unwrap();
        let producer = generations.producer.as_ref().unwrap();
        assert_eq!(producer.thread().name(), Some(PRODUCER_THREAD_NAME));
    }

    #[test]
    fn test_zero_capacity_buffer() {
        let generations: Vec<Universe> = Engine::new()
            .with_generation_limit(3)
            .run(Universe::new_glider(), CancellationToken::new(), 0)
            .unwrap()
            .collect();
        assert_eq!(generations.len(), 3);
    }
}

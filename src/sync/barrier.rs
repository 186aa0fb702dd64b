//! A reusable barrier.

use super::{Condvar, Mutex};

use std::fmt;
use std::sync::PoisonError;

use tracing::trace;

/// Blocks a fixed number of parties until all of them have arrived.
///
/// Unlike a join, a `Barrier` resets itself as soon as the last party arrives
/// and can be used for any number of rounds. Rounds are numbered by a
/// generation that starts at 0 and advances by one every time the barrier
/// releases.
///
/// If fewer parties than the quorum ever arrive, the barrier blocks forever.
/// It never releases a partial round.
pub struct Barrier {
    state: Mutex<State>,
    cvar: Condvar,
    parties: usize,
}

struct State {
    arrived: usize,
    generation: u64,
}

/// Returned by [`Barrier::arrive_and_wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierWaitResult {
    leader: bool,
    generation: u64,
}

impl Barrier {
    /// Creates a barrier that releases once `parties` threads have arrived.
    ///
    /// A barrier for 0 parties behaves like a barrier for 1.
    pub fn new(parties: usize) -> Barrier {
        Barrier {
            state: Mutex::new(State {
                arrived: 0,
                generation: 0,
            }),
            cvar: Condvar::new(),
            parties: parties.max(1),
        }
    }

    /// Number of parties needed to release a round.
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Number of rounds released so far.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Arrives at the barrier and blocks until the quorum has arrived.
    ///
    /// The last party to arrive releases the round and is reported as its
    /// leader. Exactly one party per round is the leader.
    pub fn arrive_and_wait(&self) -> BarrierWaitResult {
        let mut state = self.lock();
        let generation = state.generation;

        state.arrived += 1;

        if state.arrived < self.parties {
            while generation == state.generation {
                state = self
                    .cvar
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }

            BarrierWaitResult {
                leader: false,
                generation,
            }
        } else {
            state.arrived = 0;
            state.generation = generation.wrapping_add(1);
            trace!(generation, parties = self.parties, "barrier released");

            self.cvar.notify_all();

            BarrierWaitResult {
                leader: true,
                generation,
            }
        }
    }

    fn lock(&self) -> crate::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Barrier {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Barrier")
            .field("parties", &self.parties)
            .finish()
    }
}

impl BarrierWaitResult {
    /// Returns `true` if this party released the round.
    pub fn is_leader(&self) -> bool {
        self.leader
    }

    /// The generation of the round that was released.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

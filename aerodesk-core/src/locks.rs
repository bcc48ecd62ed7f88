use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Registry = Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>;

/// Serializes check-in runs per flight. Runs for different flights never wait on each other.
///
/// A flight's entry lives only while some run holds or waits for it.
#[derive(Default)]
pub struct FlightLocks {
    locks: Registry,
}

impl FlightLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other run holds `flight_id`. The lock is released when the guard drops.
    pub async fn acquire(&self, flight_id: i64) -> FlightGuard {
        // Built before waiting so a cancelled wait still releases the entry.
        let mut held = FlightGuard {
            flight_id,
            guard: None,
            registry: self.locks.clone(),
        };
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(flight_id).or_default().clone()
        };
        held.guard = Some(lock.lock_owned().await);
        held
    }

    /// Flights currently held or waited on.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Held lock on one flight. Dropping it removes the flight's entry once nobody else refers to it.
pub struct FlightGuard {
    flight_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
    registry: Registry,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.flight_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.flight_id);
        }
    }
}

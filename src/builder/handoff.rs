//! Single-slot mailbox moving completed builds across threads.

use parking_lot::Mutex;

/// A single-slot cross-thread mailbox.
///
/// Holds at most one pending value: a new `store` overwrites an undrained
/// one, because the consumer only cares about the latest result, not
/// history. The lock guards only the slot swap and is held for O(1) time,
/// never across a computation, so the value a consumer drains is always
/// one the producer finished writing.
#[derive(Debug)]
pub struct HandoffCell<T> {
    slot: Mutex<Option<T>>,
}

impl<T> HandoffCell<T> {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Fill the slot, replacing any undrained value. Returns `true` when a
    /// previous value was discarded. Producer side.
    pub fn store(&self, value: T) -> bool {
        self.slot.lock().replace(value).is_some()
    }

    /// Drain the slot, leaving it empty. Consumer side; never blocks
    /// beyond the O(1) slot swap.
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }

    /// True when no value is waiting.
    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<T> Default for HandoffCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let cell = HandoffCell::new();
        assert!(cell.is_empty());
        assert_eq!(cell.take(), None::<i32>);

        assert!(!cell.store(1));
        assert!(!cell.is_empty());
        assert_eq!(cell.take(), Some(1));
        assert!(cell.is_empty());
    }

    #[test]
    fn test_store_overwrites() {
        let cell = HandoffCell::new();
        assert!(!cell.store(1));
        assert!(cell.store(2));
        assert_eq!(cell.take(), Some(2));
        assert_eq!(cell.take(), None);
    }

    #[test]
    fn test_cross_thread_handoff() {
        let cell = std::sync::Arc::new(HandoffCell::new());
        let producer = {
            let cell = cell.clone();
            std::thread::spawn(move || cell.store(vec![1.0f32, 2.0, 3.0]))
        };
        producer.join().unwrap();
        assert_eq!(cell.take(), Some(vec![1.0, 2.0, 3.0]));
    }
}

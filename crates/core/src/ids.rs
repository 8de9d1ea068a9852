//! Identifier generation from creation timestamps.
//!
//! Ids are the creation time in Unix milliseconds, rendered in decimal. Two
//! ids requested within the same millisecond would collide, so the generator
//! hands out strictly increasing values.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::types::DocId;

/// Monotonic millisecond-timestamp id source.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next id for the given wall-clock reading (milliseconds).
    ///
    /// Returns `now_ms` unless an id at or after it was already issued, in
    /// which case the previous id plus one is returned.
    pub fn next_at(&self, now_ms: i64) -> DocId {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => current = actual,
            }
        }
    }

    pub fn next_id(&self) -> DocId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }
}

static GENERATOR: IdGenerator = IdGenerator::new();

/// Process-wide timestamp id.
pub fn timestamp_id() -> DocId {
    GENERATOR.next_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_clock_when_ahead() {
        let gen = IdGenerator::new();
        assert_eq!(gen.next_at(1_700_000_000_000), "1700000000000");
        assert_eq!(gen.next_at(1_700_000_000_500), "1700000000500");
    }

    #[test]
    fn same_millisecond_is_bumped() {
        let gen = IdGenerator::new();
        let a = gen.next_at(1_000);
        let b = gen.next_at(1_000);
        let c = gen.next_at(999);
        assert_eq!(a, "1000");
        assert_eq!(b, "1001");
        assert_eq!(c, "1002");
    }

    #[test]
    fn global_ids_are_distinct() {
        let a = timestamp_id();
        let b = timestamp_id();
        assert_ne!(a, b);
        assert!(a.parse::<i64>().is_ok());
    }
}

use std::cell::Cell;
use std::rc::Rc;

/// 毫秒级墙钟
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// 系统时间
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the observer owns another.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();
        handle.advance(250);
        assert_eq!(clock.now_ms(), 1_250);
        clock.set(5);
        assert_eq!(handle.now_ms(), 5);
    }

    #[test]
    fn test_manual_clock_advance_saturates() {
        let clock = ManualClock::new(i64::MAX - 1);
        clock.advance(16);
        assert_eq!(clock.now_ms(), i64::MAX);
        clock.set(i64::MIN + 1);
        clock.advance(-16);
        assert_eq!(clock.now_ms(), i64::MIN);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}

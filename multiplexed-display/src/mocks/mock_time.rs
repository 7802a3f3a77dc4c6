use crate::common::time::{Duration, Instant, RealTimeClock, self};

pub struct MockTime {
    now: core::cell::Cell<Instant>,
}

impl MockTime {
    pub fn new() -> Self {
        Self { now: core::cell::Cell::new(time::ZERO_INSTANT) }
    }

    pub fn increment_micros(&self, micros: u64) {
        self.now.set(self.now.get() + Duration::micros(micros));
    }

    pub fn increment_millis(&self, millis: u64) {
        self.now.set(self.now.get() + Duration::millis(millis));
    }
}

impl RealTimeClock for MockTime {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

impl RealTimeClock for &MockTime {
    fn now(&self) -> Instant {
        (*self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        assert_eq!(time::ZERO_INSTANT, MockTime::new().now());
    }

    #[test]
    fn test_increment_millis() {
        let time = MockTime::new();
        time.increment_millis(1000);

        assert_eq!(time::ZERO_INSTANT + Duration::millis(1000), time.now());
    }

    #[test]
    fn test_increment_micros() {
        let time = MockTime::new();
        time.increment_micros(250);

        assert_eq!(time::ZERO_INSTANT + Duration::micros(250), time.now());
    }
}

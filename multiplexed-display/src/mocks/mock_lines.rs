use std::collections::HashMap;
use embedded_hal::digital::{Error, ErrorKind, ErrorType, OutputPin, PinState};

use crate::lines::LineControl;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MockPinError {
    Bad,
}

impl Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A mock of the embedded_hal::digital::OutputPin trait that remembers the
/// last state it was set to.
pub struct MockPin {
    state: Option<PinState>,
    fail: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self { state: None, fail: false }
    }

    /// A pin whose writes always fail.
    pub fn failing() -> Self {
        Self { state: None, fail: true }
    }

    /// The last state written, or None if never written.
    pub fn state(&self) -> Option<PinState> {
        self.state
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::High)
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockPinError::Bad);
        }

        self.state = Some(state);
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LineOp {
    Configure(u8),
    Write(u8, PinState),
}

/// A LineControl that records every operation performed on it, in order, and
/// tracks the current level of each line.
pub struct MockLines {
    ops: Vec<LineOp>,
    levels: HashMap<u8, PinState>,
    writes_until_failure: Option<usize>,
}

impl MockLines {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            levels: HashMap::new(),
            writes_until_failure: None,
        }
    }

    /// Makes the write after `writes` more successful writes fail.
    pub fn fail_after(&mut self, writes: usize) {
        self.writes_until_failure = Some(writes);
    }

    pub fn ops(&self) -> &[LineOp] {
        &self.ops
    }

    /// Returns the recorded operations and forgets them.
    pub fn take_ops(&mut self) -> Vec<LineOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn level(&self, line: u8) -> Option<PinState> {
        self.levels.get(&line).copied()
    }

    /// Returns which of `lines` are at `level`.
    pub fn lines_at(&self, lines: &[u8], level: PinState) -> Vec<u8> {
        lines.iter().copied().filter(|line| self.level(*line) == Some(level)).collect()
    }
}

impl LineControl for MockLines {
    type Line = u8;
    type Error = MockPinError;

    fn configure_output(&mut self, line: u8) -> Result<(), Self::Error> {
        self.ops.push(LineOp::Configure(line));
        Ok(())
    }

    fn write_line(&mut self, line: u8, level: PinState) -> Result<(), Self::Error> {
        match self.writes_until_failure {
            Some(0) => return Err(MockPinError::Bad),
            Some(n) => self.writes_until_failure = Some(n - 1),
            None => {},
        }

        self.ops.push(LineOp::Write(line, level));
        self.levels.insert(line, level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_ops() {
        let mut lines = MockLines::new();

        lines.configure_output(3).unwrap();
        lines.write_line(3, PinState::High).unwrap();

        assert_eq!(lines.ops(), &[LineOp::Configure(3), LineOp::Write(3, PinState::High)]);
        assert_eq!(lines.level(3), Some(PinState::High));
        assert_eq!(lines.level(4), None);
    }

    #[test]
    fn test_take_ops() {
        let mut lines = MockLines::new();

        lines.write_line(1, PinState::Low).unwrap();
        assert_eq!(lines.take_ops().len(), 1);
        assert!(lines.ops().is_empty());
        // Levels are kept
        assert_eq!(lines.level(1), Some(PinState::Low));
    }

    #[test]
    fn test_fail_after() {
        let mut lines = MockLines::new();
        lines.fail_after(1);

        assert!(lines.write_line(1, PinState::Low).is_ok());
        assert_eq!(lines.write_line(2, PinState::Low), Err(MockPinError::Bad));
        assert_eq!(lines.ops().len(), 1);
    }

    #[test]
    fn test_mock_pin() {
        let mut pin = MockPin::new();
        assert_eq!(pin.state(), None);

        pin.set_high().unwrap();
        assert_eq!(pin.state(), Some(PinState::High));

        assert!(MockPin::failing().set_low().is_err());
    }
}

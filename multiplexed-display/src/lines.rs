//! The output lines a multiplexed display is wired to.
//!
//! A display only ever needs to make a line an output and drive it high or
//! low, so that is all [`LineControl`] asks for. Lines are named by a small
//! `Copy` identifier chosen by the implementation (a pin index, an expander
//! pin, ...), which lets a single controller own every pin of the display.
use embedded_hal::digital::{OutputPin, PinState};

/// Capability to configure and drive a set of digital output lines.
pub trait LineControl {
    /// Identifies one line.
    type Line: Copy + PartialEq + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Makes `line` a digital output.
    fn configure_output(&mut self, line: Self::Line) -> Result<(), Self::Error>;

    /// Drives `line` to `level`.
    fn write_line(&mut self, line: Self::Line, level: PinState) -> Result<(), Self::Error>;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PinBankError<E> {
    Pin(E),
    NoSuchLine(usize),
}

impl<E> From<E> for PinBankError<E> {
    fn from(value: E) -> Self {
        Self::Pin(value)
    }
}

/// A bank of `N` output pins addressed by their index in the bank.
///
/// All pins must have the same type. HALs provide a type-erased pin for this
/// (e.g. `AnyPin`/`ErasedPin`), which is what the bank is meant to hold.
pub struct PinBank<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> PinBank<P, N>
where
    P: OutputPin,
{
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Consumes `self` and returns the pins so they can be reused.
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P, const N: usize> LineControl for PinBank<P, N>
where
    P: OutputPin,
{
    type Line = usize;
    type Error = PinBankError<P::Error>;

    fn configure_output(&mut self, line: usize) -> Result<(), Self::Error> {
        // Typed output pins are already outputs, so only check the line exists
        if line < N {
            Ok(())
        } else {
            Err(PinBankError::NoSuchLine(line))
        }
    }

    fn write_line(&mut self, line: usize, level: PinState) -> Result<(), Self::Error> {
        match self.pins.get_mut(line) {
            Some(pin) => Ok(pin.set_state(level)?),
            None => Err(PinBankError::NoSuchLine(line)),
        }
    }
}

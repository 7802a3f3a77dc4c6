//! A display that can be driven from an interrupt handler while the main loop
//! changes what it shows.
//!
//! ```ignore
//! static DISPLAY: SharedDisplay<PinBank<AnyPin, 12>, 4> = SharedDisplay::new();
//!
//! // In setup
//! DISPLAY.install(display);
//!
//! // In the timer interrupt
//! DISPLAY.tick().ok();
//!
//! // In the main loop
//! DISPLAY.with(|display| display.set_value(count, false, None));
//! ```
use core::cell::RefCell;

use critical_section::Mutex;

use crate::{
    lines::LineControl,
    segment_display::{DisplayResult, SegmentDisplay},
};

pub struct SharedDisplay<C: LineControl, const DIGITS: usize> {
    display: Mutex<RefCell<Option<SegmentDisplay<C, DIGITS>>>>,
}

impl<C: LineControl, const DIGITS: usize> SharedDisplay<C, DIGITS> {
    /// Creates an empty slot, usable as a `static`.
    pub const fn new() -> Self {
        Self {
            display: Mutex::new(RefCell::new(None)),
        }
    }

    /// Puts `display` in the slot, returning the display it replaces.
    pub fn install(&self, display: SegmentDisplay<C, DIGITS>) -> Option<SegmentDisplay<C, DIGITS>> {
        critical_section::with(|cs| self.display.borrow_ref_mut(cs).replace(display))
    }

    /// Removes the display from the slot.
    pub fn take(&self) -> Option<SegmentDisplay<C, DIGITS>> {
        critical_section::with(|cs| self.display.borrow_ref_mut(cs).take())
    }

    /// Runs `f` on the display inside a critical section. Returns `None`
    /// without running `f` if no display is installed.
    pub fn with<T>(&self, f: impl FnOnce(&mut SegmentDisplay<C, DIGITS>) -> T) -> Option<T> {
        critical_section::with(|cs| self.display.borrow_ref_mut(cs).as_mut().map(f))
    }

    /// Shows the next digit. Does nothing if no display is installed.
    pub fn tick(&self) -> DisplayResult<(), C::Error> {
        self.with(|display| display.tick()).unwrap_or(Ok(()))
    }
}

impl<C: LineControl, const DIGITS: usize> Default for SharedDisplay<C, DIGITS> {
    fn default() -> Self {
        Self::new()
    }
}

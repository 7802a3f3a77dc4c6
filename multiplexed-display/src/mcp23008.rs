//! The MCP23008 is an IO expander IC that communicates over I2C. It supports
//! 8 GPIO pins that can be individually configured as inputs or outputs.
//! Output states are latched, so a pin holds its level until it is written
//! again.
//!
//! Only the output side of the device is driven here, which is enough to run
//! the segment or digit lines of a multiplexed display from the expander.
//! Every line write is one I2C transaction, so expect a lower refresh rate
//! than with native GPIOs.
//!
//! [MCP23008 Datasheet](https://cdn-shop.adafruit.com/datasheets/MCP23008.pdf)
use embedded_hal::{digital::PinState, i2c::I2c};

use crate::lines::LineControl;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

// Whether a pin is input or output. 0 = output, 1 = input.
const IODIR_REGISTER: u8 = 0x00;
// All pins default to inputs
const IODIR_DEFAULT: u8 = 0b1111_1111;
// All input pins default to normal polarity (i.e. are not auto-inverted)
const IPOL_DEFAULT: u8 = 0b0000_0000;
const GPINTEN_DEFAULT: u8 = 0b0000_0000;
const DEFVAL_DEFAULT: u8 = 0b0000_0000;
const INTCON_DEFAULT: u8 = 0b0000_0000;
// bits 7-6: noop
// bit 5 = 0: Address pointer auto increments
// bit 4 = 0: SDA slew rate disabled
// bit 3: noop
// bit 2 = 0: Interrupt pin is active driver (as opposed to open-drain)
// bit 1 = 0: Interrupt pin is active-high
// bit 0: noop
const IOCON_DEFAULT: u8 = 0b0000_0000;
const GPPU_DEFAULT: u8 = 0b0000_0000;
// Output latch. Writing here sets the level of every output pin.
const OLAT_REGISTER: u8 = 0x0A;
const OLAT_DEFAULT: u8 = 0b0000_0000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mcp23008Error<I2C> {
    I2c(I2C),
}

impl<I2C> From<I2C> for Mcp23008Error<I2C> {
    fn from(value: I2C) -> Self {
        Self::I2c(value)
    }
}

/// The available GPIO pins on the device.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pin {
    GPIO0 = 0b0000_0001,
    GPIO1 = 0b0000_0010,
    GPIO2 = 0b0000_0100,
    GPIO3 = 0b0000_1000,
    GPIO4 = 0b0001_0000,
    GPIO5 = 0b0010_0000,
    GPIO6 = 0b0100_0000,
    GPIO7 = 0b1000_0000,
}

impl Pin {
    pub const fn all() -> [Pin; 8] {
        use Pin::*;
        [GPIO0, GPIO1, GPIO2, GPIO3, GPIO4, GPIO5, GPIO6, GPIO7]
    }
}

/// Output lines of a MCP23008. The IODIR and OLAT registers are cached so
/// that each line change is a single register write.
pub struct Mcp23008Lines<I2C> {
    i2c: I2C,
    address: u8,
    iodir: u8,
    olat: u8,
}

impl<I2C, E> Mcp23008Lines<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    /// Creates a new driver that will communicate using `i2c` as the I2C bus
    /// to a MCP23008 device at `address`. Valid addresses for the MCP23008 are
    /// 0x20 - 0x27.
    /// This function does not communicate with the device.
    pub fn new(i2c: I2C, address: u8) -> Self {
        assert!(address & 0b1111_1000 == 0b0010_0000);

        Self {
            i2c,
            address,
            iodir: IODIR_DEFAULT,
            olat: OLAT_DEFAULT,
        }
    }

    /// Resets the device to its power-on-reset configuration: every pin an
    /// input, no pull-ups, no interrupts, output latch cleared.
    pub fn initialize(&mut self) -> Result<(), Mcp23008Error<E>> {
        // The write starts at the IODIR register and continues through all
        // registers. The device automatically increments the target register
        // after each byte is written.
        // This writes to a few read only registers, but the device ignores those.
        self.i2c.write(self.address, &[
            IODIR_REGISTER,
            IODIR_DEFAULT,
            IPOL_DEFAULT,
            GPINTEN_DEFAULT,
            DEFVAL_DEFAULT,
            INTCON_DEFAULT,
            IOCON_DEFAULT,
            GPPU_DEFAULT,
            0, // INTF, read only
            0, // INTCAP, read only
            0, // GPIO, read only
            OLAT_DEFAULT,
        ])?;

        self.iodir = IODIR_DEFAULT;
        self.olat = OLAT_DEFAULT;
        debug!("MCP23008 at {:#x} reset", self.address);

        Ok(())
    }

    /// Returns whether `pin` is configured as an output.
    pub fn is_output(&self, pin: Pin) -> bool {
        self.iodir & (pin as u8) == 0
    }

    /// Returns whether `pin` is latched high.
    pub fn is_set_high(&self, pin: Pin) -> bool {
        self.olat & (pin as u8) != 0
    }

    /// Consumes `self` and returns the `i2c` that it owned so it can be reused.
    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> LineControl for Mcp23008Lines<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    type Line = Pin;
    type Error = Mcp23008Error<E>;

    fn configure_output(&mut self, pin: Pin) -> Result<(), Self::Error> {
        // 0 = output
        let iodir = self.iodir & !(pin as u8);
        self.i2c.write(self.address, &[IODIR_REGISTER, iodir])?;
        self.iodir = iodir;
        Ok(())
    }

    fn write_line(&mut self, pin: Pin, level: PinState) -> Result<(), Self::Error> {
        let olat = match level {
            PinState::High => self.olat | pin as u8,
            PinState::Low => self.olat & !(pin as u8),
        };

        self.i2c.write(self.address, &[OLAT_REGISTER, olat])?;
        self.olat = olat;
        Ok(())
    }
}

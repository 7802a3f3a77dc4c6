//! Driver for multiplexed multi-digit seven-segment LED displays wired
//! directly to output lines.
//!
//! Each segment is an LED connected between one of the shared segment lines
//! and one of the per-digit lines. Only one digit line is energized at a time,
//! so the driver keeps the segments of every digit in a buffer and
//! [`SegmentDisplay::tick`] moves on to the next digit each time it is called.
//! Called often enough (at least 25 times per second per digit, e.g. 100 times
//! per second for 4 digits), the whole display appears lit.
//!
//! The buffer can be changed at any time, either directly through indexing or
//! with the helpers that format numbers and text. Changes become visible the
//! next time the changed digit is shown.
//!
//! The driver does no locking. Mutations and ticks must come from one context
//! at a time, see [`crate::shared::SharedDisplay`] for calling it from both an
//! interrupt handler and the main loop.
use core::ops::{Index, IndexMut};

use embedded_hal::digital::PinState;

use crate::{glyph, lines::LineControl};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

// a to g plus the decimal point
const MAX_SEGMENTS: usize = 8;
const SEGMENTS_WITHOUT_DP: usize = 7;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DisplayError<E> {
    /// Driving a line failed.
    Line(E),
    /// Lines were driven before `bind` was called.
    NotBound,
    /// `bind` was called more than once.
    AlreadyBound,
    /// `bind` was given the wrong number of segment lines.
    SegmentLineCount { expected: usize, actual: usize },
}

impl<E> From<E> for DisplayError<E> {
    fn from(value: E) -> Self {
        Self::Line(value)
    }
}

pub type DisplayResult<T, E> = Result<T, DisplayError<E>>;

/// Electrical configuration of a display.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Whether each digit has a decimal point segment (bit 7 of its segments).
    pub decimal_point: bool,
    /// Level that energizes a digit line.
    pub digit_on: PinState,
    /// Level that lights a segment line.
    pub segment_on: PinState,
}

impl DisplayConfig {
    /// A common cathode display with the digit commons sunk directly by the
    /// digit lines.
    pub const fn common_cathode(decimal_point: bool) -> Self {
        Self {
            decimal_point,
            digit_on: PinState::Low,
            segment_on: PinState::High,
        }
    }

    /// A common anode display with the digit commons sourced directly by the
    /// digit lines.
    pub const fn common_anode(decimal_point: bool) -> Self {
        Self {
            decimal_point,
            digit_on: PinState::High,
            segment_on: PinState::Low,
        }
    }

    /// Number of segment lines per digit: 7, or 8 with a decimal point.
    pub const fn segment_count(&self) -> usize {
        if self.decimal_point {
            MAX_SEGMENTS
        } else {
            SEGMENTS_WITHOUT_DP
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimal_point: false,
            digit_on: PinState::High,
            segment_on: PinState::High,
        }
    }
}

/// Number base used when formatting values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Radix {
    Binary = 2,
    Octal = 8,
    Decimal = 10,
    Hexadecimal = 16,
}

/// The lines a display was bound to. Never changes once bound.
struct PinBinding<L, const DIGITS: usize> {
    digits: [L; DIGITS],
    segments: [L; MAX_SEGMENTS],
    segment_count: usize,
}

impl<L, const DIGITS: usize> PinBinding<L, DIGITS> {
    fn segments(&self) -> &[L] {
        &self.segments[..self.segment_count]
    }
}

/// A multiplexed display of `DIGITS` digits, digit 0 being the leftmost.
pub struct SegmentDisplay<C: LineControl, const DIGITS: usize> {
    lines: C,
    config: DisplayConfig,
    binding: Option<PinBinding<C::Line, DIGITS>>,
    // lsb = segment a, msb = decimal point, 1 = lit
    segments: [u8; DIGITS],
    // Digit currently energized. DIGITS means blanked.
    cursor: usize,
    // Target of out of range indexing
    scratch: u8,
}

impl<C: LineControl, const DIGITS: usize> SegmentDisplay<C, DIGITS> {
    /// Creates a blanked display with every segment off, that will drive its
    /// lines through `lines`.
    /// This function does not drive any lines, call `bind` for that.
    pub fn new(lines: C, config: DisplayConfig) -> Self {
        assert!(DIGITS > 0);

        Self {
            lines,
            config,
            binding: None,
            segments: [glyph::BLANK; DIGITS],
            cursor: DIGITS,
            scratch: glyph::BLANK,
        }
    }

    pub fn config(&self) -> DisplayConfig {
        self.config
    }

    /// Binds the display to its lines, left to right for `digit_lines` and
    /// a to g (then the decimal point, if configured) for `segment_lines`.
    ///
    /// Every line is made an output and turned off, then the display is left
    /// blanked or showing digit 0 according to `start_blanked`.
    pub fn bind(
        &mut self,
        digit_lines: [C::Line; DIGITS],
        segment_lines: &[C::Line],
        start_blanked: bool,
    ) -> DisplayResult<(), C::Error> {
        if self.binding.is_some() {
            warn!("Display is already bound, ignoring new lines");
            return Err(DisplayError::AlreadyBound);
        }

        let segment_count = self.config.segment_count();

        if segment_lines.len() != segment_count {
            return Err(DisplayError::SegmentLineCount {
                expected: segment_count,
                actual: segment_lines.len(),
            });
        }

        let digit_off = !self.config.digit_on;
        for line in digit_lines {
            self.lines.configure_output(line)?;
            self.lines.write_line(line, digit_off)?;
        }

        let segment_off = !self.config.segment_on;
        for &line in segment_lines {
            self.lines.configure_output(line)?;
            self.lines.write_line(line, segment_off)?;
        }

        let mut segments = [segment_lines[0]; MAX_SEGMENTS];
        segments[..segment_count].copy_from_slice(segment_lines);

        self.binding = Some(PinBinding {
            digits: digit_lines,
            segments,
            segment_count,
        });

        info!("Bound display with {} digits and {} segments", DIGITS, segment_count);

        self.set_blank(start_blanked)
    }

    /// Energizes `target`, or blanks the display when `target` is out of
    /// range.
    ///
    /// The previous digit is turned off and the segments are loaded before the
    /// new digit is turned on, otherwise the previous digit would briefly show
    /// the new segments. When coming out of blanking nothing is lit, so the
    /// segments are left alone until the next digit change.
    ///
    /// If a line fails to be driven, the cursor is left unchanged.
    fn select_digit(&mut self, target: usize) -> DisplayResult<(), C::Error> {
        let binding = match &self.binding {
            Some(binding) => binding,
            None => return Err(DisplayError::NotBound),
        };

        let digit_on = self.config.digit_on;
        let segment_on = self.config.segment_on;

        if self.cursor < DIGITS {
            if target != self.cursor {
                self.lines.write_line(binding.digits[self.cursor], !digit_on)?;
            }

            let mut bits = if target < DIGITS {
                self.segments[target]
            } else {
                glyph::BLANK
            };

            for &line in binding.segments() {
                let level = if bits & 1 != 0 { segment_on } else { !segment_on };
                self.lines.write_line(line, level)?;
                bits >>= 1;
            }
        }

        if target < DIGITS {
            self.lines.write_line(binding.digits[target], digit_on)?;
        }

        self.cursor = target;
        Ok(())
    }

    /// Shows the next digit, wrapping from the rightmost to the leftmost.
    /// Does nothing while the display is blanked.
    pub fn tick(&mut self) -> DisplayResult<(), C::Error> {
        if self.cursor < DIGITS {
            self.select_digit((self.cursor + 1) % DIGITS)
        } else {
            Ok(())
        }
    }

    /// Turns every line off when `blank` is true. Otherwise shows digit 0
    /// and lets `tick` continue from there.
    pub fn set_blank(&mut self, blank: bool) -> DisplayResult<(), C::Error> {
        if blank {
            self.select_digit(DIGITS)?;
            debug!("Display blanked");
        } else {
            self.select_digit(0)?;
            debug!("Display unblanked");
        }

        Ok(())
    }

    pub fn is_blank(&self) -> bool {
        self.cursor >= DIGITS
    }

    /// Returns the digit that is currently energized, or `None` when blanked.
    pub fn cursor(&self) -> Option<usize> {
        if self.cursor < DIGITS {
            Some(self.cursor)
        } else {
            None
        }
    }

    /// Returns the segments of every digit.
    pub fn digits(&self) -> &[u8; DIGITS] {
        &self.segments
    }

    /// Turns off every segment of every digit. The lines are not changed
    /// until the next tick.
    pub fn clear(&mut self) {
        self.segments = [glyph::BLANK; DIGITS];
    }

    /// Sets the segments of digit `index` to `bitmap`. If `show` is true the
    /// digit is shown immediately, which also ends blanking.
    ///
    /// Out of range indices are ignored.
    pub fn set_segments(&mut self, index: usize, bitmap: u8, show: bool) -> DisplayResult<(), C::Error> {
        if index >= DIGITS {
            debug!("Ignoring segments for digit {} of {}", index, DIGITS);
            return Ok(());
        }

        self.segments[index] = bitmap;

        if show {
            self.select_digit(index)?;
        }

        Ok(())
    }

    /// Sets digit `index` to the hexadecimal glyph for `value`, with or
    /// without its `decimal_point`. If `show` is true the digit is shown
    /// immediately, which also ends blanking.
    ///
    /// Only values 0-15 have glyphs. Anything else, and out of range indices,
    /// are ignored.
    pub fn set_number(
        &mut self,
        index: usize,
        value: u8,
        decimal_point: bool,
        show: bool,
    ) -> DisplayResult<(), C::Error> {
        if index >= DIGITS {
            debug!("Ignoring number for digit {} of {}", index, DIGITS);
            return Ok(());
        }

        match glyph::hex_glyph(value) {
            Some(data) => self.set_segments(index, with_decimal_point(data, decimal_point), show),
            None => {
                warn!("No glyph for {}, digit {} left unchanged", value, index);
                Ok(())
            },
        }
    }

    /// Shows `value` in decimal, right aligned. See `set_value_radix`.
    pub fn set_value(&mut self, value: u32, leading_zero: bool, decimal_point: Option<usize>) -> bool {
        self.set_value_radix(value, Radix::Decimal, leading_zero, decimal_point)
    }

    /// Shows `value` in `radix` across the whole display, right aligned.
    ///
    /// Leading zeros are blank unless `leading_zero` is set, but the rightmost
    /// digit and every digit from `decimal_point` rightwards always show their
    /// number, so `5` with the decimal point on digit 1 of 4 shows " 0.05".
    /// `None` means no decimal point.
    ///
    /// Returns false if `value` has more digits than the display. The
    /// rightmost digits are still shown, i.e. `value` modulo the display's
    /// range.
    pub fn set_value_radix(
        &mut self,
        value: u32,
        radix: Radix,
        leading_zero: bool,
        decimal_point: Option<usize>,
    ) -> bool {
        let radix = radix as u32;
        let decimal_point = decimal_point.unwrap_or(DIGITS);
        let mut value = value;

        for i in (0..DIGITS).rev() {
            let digit = (value % radix) as usize;
            let is_decimal_point = decimal_point == i;

            // Show the digit unless this is a leading zero. Checking `value`
            // before dividing covers both this digit and the ones above it.
            if value != 0 || leading_zero || i >= decimal_point || i == DIGITS - 1 {
                let data = glyph::HEX_GLYPHS[digit];
                self.segments[i] = with_decimal_point(data, is_decimal_point);
            } else {
                self.segments[i] = with_decimal_point(glyph::BLANK, is_decimal_point);
            }

            value /= radix;
        }

        value == 0
    }

    /// Shows `text` from the leftmost digit using the seven-segment font in
    /// [`glyph::char_glyph`]. Unsupported characters show as blanks. A `.`
    /// lights the decimal point of the character before it rather than taking
    /// a digit of its own. Digits past the end of `text` are cleared.
    ///
    /// Returns false if `text` didn't fit, in which case the extra characters
    /// are dropped.
    pub fn set_text(&mut self, text: &str) -> bool {
        let mut data = [glyph::BLANK; DIGITS];
        let mut position = 0;
        let mut fits = true;

        for char in text.chars() {
            if char == '.' && position > 0 && data[position - 1] & glyph::DECIMAL_POINT == 0 {
                data[position - 1] |= glyph::DECIMAL_POINT;
                continue;
            }

            if position >= DIGITS {
                fits = false;
                break;
            }

            data[position] = match char {
                '.' => glyph::DECIMAL_POINT,
                _ => glyph::char_glyph(char).unwrap_or_else(|| {
                    debug!("No glyph for {:?}, showing a blank", char);
                    glyph::BLANK
                }),
            };
            position += 1;
        }

        self.segments = data;
        fits
    }

    /// Blanks the display, ignoring errors, and returns the line controller
    /// so it can be reused.
    pub fn release(mut self) -> C {
        if self.binding.is_some() {
            self.set_blank(true).unwrap_or_default();
        }

        self.lines
    }
}

/// Raw access to the segments of a digit. Indices past the last digit read
/// and write a scratch byte instead, so writes to them are lost and reads
/// return whatever was last written there.
impl<C: LineControl, const DIGITS: usize> Index<usize> for SegmentDisplay<C, DIGITS> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        self.segments.get(index).unwrap_or(&self.scratch)
    }
}

impl<C: LineControl, const DIGITS: usize> IndexMut<usize> for SegmentDisplay<C, DIGITS> {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        match self.segments.get_mut(index) {
            Some(segments) => segments,
            None => &mut self.scratch,
        }
    }
}

fn with_decimal_point(data: u8, decimal_point: bool) -> u8 {
    if decimal_point {
        data | glyph::DECIMAL_POINT
    } else {
        data
    }
}

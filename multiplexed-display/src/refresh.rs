//! Pacing for [`SegmentDisplay::tick`] when it is called from a busy main
//! loop rather than a timer interrupt.
use crate::{
    common::time::{Duration, Instant, RealTimeClock},
    lines::LineControl,
    segment_display::{DisplayResult, SegmentDisplay},
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Below this many frames per second the display visibly flickers.
pub const MIN_FRAME_RATE_HZ: u32 = 25;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Tells when the next digit of a display is due, so that every digit is
/// shown `frame_rate_hz` times per second.
pub struct RefreshTimer<R> {
    rtc: R,
    digit_period: Duration,
    next_tick: Instant,
}

impl<R> RefreshTimer<R>
where
    R: RealTimeClock,
{
    /// Creates a timer for a display of `digits` digits. Frame rates below
    /// `MIN_FRAME_RATE_HZ` are raised to it. The first digit is due
    /// immediately.
    pub fn new(rtc: R, digits: usize, frame_rate_hz: u32) -> Self {
        let frame_rate_hz = frame_rate_hz.max(MIN_FRAME_RATE_HZ);
        let ticks_per_second = frame_rate_hz as u64 * digits.max(1) as u64;
        let digit_period = Duration::micros((MICROS_PER_SECOND / ticks_per_second).max(1));
        let next_tick = rtc.now();

        debug!("Refreshing {} digits every {} us", digits, digit_period.to_micros());

        Self {
            rtc,
            digit_period,
            next_tick,
        }
    }

    /// How long each digit stays lit.
    pub fn digit_period(&self) -> Duration {
        self.digit_period
    }

    /// Returns true, once, each time a digit period has elapsed.
    pub fn is_due(&mut self) -> bool {
        let now = self.rtc.now();

        if now < self.next_tick {
            return false;
        }

        self.next_tick = self.next_tick + self.digit_period;

        // Polling fell behind by more than a period. Don't try to catch up,
        // it would only show digits for less than their period.
        if self.next_tick <= now {
            self.next_tick = now + self.digit_period;
        }

        true
    }

    /// Ticks `display` if its next digit is due. Returns whether it ticked.
    pub fn poll<C, const DIGITS: usize>(
        &mut self,
        display: &mut SegmentDisplay<C, DIGITS>,
    ) -> DisplayResult<bool, C::Error>
    where
        C: LineControl,
    {
        if self.is_due() {
            display.tick()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

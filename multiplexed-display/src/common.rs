pub mod time {

    // Digit periods are a few milliseconds at most, so a microsecond timer base
    // is plenty. Any monotonic clock source can be adapted by converting its
    // ticks to microseconds in its RealTimeClock impl.
    const HERTZ: u32 = 1_000_000;
    pub type Instant = fugit::TimerInstantU64<HERTZ>;
    pub type Duration = fugit::TimerDurationU64<HERTZ>;

    pub const ZERO_INSTANT: Instant = Instant::from_ticks(0);

    pub trait RealTimeClock {
        fn now(&self) -> Instant;
    }
}

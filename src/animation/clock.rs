/// Playback clock of one player.
///
/// Real time accumulates in `elapsed_seconds`; `current_tick` is derived
/// from it through the clip's tick rate on every advance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackClock {
    elapsed_seconds: f64,
    current_tick: f64,
}

impl PlaybackClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    #[inline]
    #[must_use]
    pub fn current_tick(&self) -> f64 {
        self.current_tick
    }

    /// Advances by `dt` seconds and returns the tick to sample this frame.
    ///
    /// When the tick passes `duration_ticks` the elapsed time restarts at
    /// zero, but the returned tick is still the overshooting one. The next
    /// advance recomputes the tick from the reset time.
    pub fn advance(&mut self, dt: f64, ticks_per_second: f64, duration_ticks: f64) -> f64 {
        self.elapsed_seconds += dt;
        self.current_tick = ticks_per_second * self.elapsed_seconds;

        if self.current_tick > duration_ticks {
            log::trace!(
                "Clock wrapped at tick {:.3} (duration {duration_ticks})",
                self.current_tick
            );
            self.elapsed_seconds = 0.0;
        }

        self.current_tick
    }

    /// Rewinds to the start.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0.0;
        self.current_tick = 0.0;
    }
}

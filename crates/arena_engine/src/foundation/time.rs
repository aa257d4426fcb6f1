//! Simulated-time utilities

/// A one-shot countdown driven by simulated frame time
///
/// Backs cooldowns and short-lived memory states: arm it with a
/// duration, tick it once per frame, and poll whether time remains.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// Create a countdown that is already expired
    pub fn expired() -> Self {
        Self { remaining: 0.0 }
    }

    /// Arm the countdown with `duration` seconds
    pub fn arm(&mut self, duration: f32) {
        self.remaining = duration;
    }

    /// Advance the countdown by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
        }
    }

    /// True while time remains
    pub fn running(&self) -> bool {
        self.remaining > 0.0
    }

    /// True once the countdown has run out
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds left, possibly slightly negative after the final tick
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_after_duration() {
        let mut countdown = Countdown::expired();
        assert!(countdown.is_ready());

        countdown.arm(1.0);
        assert!(countdown.running());

        countdown.tick(0.5);
        assert!(countdown.running());

        countdown.tick(0.5);
        assert!(countdown.is_ready());
    }

    #[test]
    fn test_countdown_tick_stops_at_zero() {
        let mut countdown = Countdown::expired();
        countdown.tick(5.0);
        countdown.tick(5.0);
        assert!(countdown.remaining() >= 0.0);
    }
}

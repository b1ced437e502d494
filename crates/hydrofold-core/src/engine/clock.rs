use super::config::{self, ConfigError};
use std::time::{Duration, Instant};

/// Paces the relaxation loop.
pub trait FrameClock {
    /// Blocks until the next tick may start.
    fn wait_for_next_frame(&mut self);
}

/// Caps the loop at a fixed number of ticks per second.
#[derive(Debug)]
pub struct FixedRateClock {
    interval: Duration,
    next_frame: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(rate_hz: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            interval: config::frame_interval(rate_hz)?,
            next_frame: None,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameClock for FixedRateClock {
    fn wait_for_next_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.next_frame.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // A late frame restarts the schedule instead of bursting to catch up.
        let base = deadline.max(now);
        self.next_frame = Some(base + self.interval);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnthrottledClock;

impl FrameClock for UnthrottledClock {
    fn wait_for_next_frame(&mut self) {}
}

/// Builds the clock for an optional frame rate; `None` means unthrottled.
pub fn clock_for_rate(rate_hz: Option<f64>) -> Result<Box<dyn FrameClock>, ConfigError> {
    let clock: Box<dyn FrameClock> = match rate_hz {
        Some(rate) => Box::new(FixedRateClock::new(rate)?),
        None => Box::new(UnthrottledClock),
    };
    Ok(clock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_inverse_of_rate() {
        let clock = FixedRateClock::new(20.0).unwrap();
        assert_eq!(clock.interval(), Duration::from_millis(50));
    }

    #[test]
    fn fixed_rate_clock_spaces_frames() {
        let mut clock = FixedRateClock::new(100.0).unwrap();
        let start = Instant::now();
        for _ in 0..4 {
            clock.wait_for_next_frame();
        }
        // First frame is immediate, the next three wait ~10ms each.
        assert!(start.elapsed() >= Duration::from_millis(28));
    }

    #[test]
    fn unthrottled_clock_never_blocks() {
        let mut clock = clock_for_rate(None).unwrap();
        let start = Instant::now();
        for _ in 0..1000 {
            clock.wait_for_next_frame();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn tiny_rate_is_rejected_instead_of_panicking() {
        assert!(FixedRateClock::new(1e-300).is_err());
        assert!(clock_for_rate(Some(1e-300)).is_err());
    }
}

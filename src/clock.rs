//! Sample clock: fixed-rate gate for the audio path.
//!
//! The caller polls at any rate; the gate opens at most once per
//! sampling period (125 µs at 8 kHz).

/// Elapsed microseconds from `a` to `b`.
///
/// Saturates at zero if `b` is earlier than `a`.
#[inline]
pub fn elapsed_us(a: u64, b: u64) -> u64 {
    b.saturating_sub(a)
}

/// Stateless readiness predicate.
///
/// The caller must set `last_fired = now` when it consumes a `true`
/// result; otherwise every later poll is ready as well.
#[inline]
pub fn ready(now_us: u64, last_fired_us: u64, period_us: u64) -> bool {
    elapsed_us(last_fired_us, now_us) >= period_us
}

/// Stateful sample clock.
///
/// Keeps its own schedule. Each fired sample moves the schedule forward by
/// exactly one period, so late polls do not accumulate drift. If the caller
/// falls more than one period behind, the schedule restarts at `now` and
/// the missed samples are dropped instead of being produced in a burst.
#[derive(Clone, Copy, Debug)]
pub struct SampleClock {
    /// Time the last sample was due; `None` before the first sample
    last_fired_us: Option<u64>,
    period_us: u64,
}

impl SampleClock {
    /// Create a clock for the given period (a zero period fires every poll).
    pub const fn new(period_us: u64) -> Self {
        Self {
            last_fired_us: None,
            period_us,
        }
    }

    /// Create a clock for a sample rate in Hz.
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self::new(1_000_000 / sample_rate.max(1) as u64)
    }

    /// Sampling period in microseconds.
    #[inline]
    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    /// Time the last sample was due.
    #[inline]
    pub fn last_fired_us(&self) -> Option<u64> {
        self.last_fired_us
    }

    /// Check the gate. Returns `true` at most once per period.
    #[inline]
    pub fn poll(&mut self, now_us: u64) -> bool {
        match self.last_fired_us {
            None => {
                self.last_fired_us = Some(now_us);
                true
            }
            Some(last) if ready(now_us, last, self.period_us) => {
                let next = last + self.period_us;
                // More than one period behind: resync instead of bursting
                self.last_fired_us = if ready(now_us, next, self.period_us) {
                    Some(now_us)
                } else {
                    Some(next)
                };
                true
            }
            Some(_) => false,
        }
    }

    /// Forget the schedule; the next poll fires immediately.
    #[inline]
    pub fn reset(&mut self) {
        self.last_fired_us = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_predicate() {
        assert!(!ready(1124, 1000, 125));
        assert!(ready(1125, 1000, 125));
        assert!(ready(5000, 1000, 125));
        // Clock went backwards: not ready
        assert!(!ready(900, 1000, 125));
    }

    #[test]
    fn test_ready_without_update_runs_away() {
        let last_fired = 0;
        let fired = (0..100u64)
            .map(|i| 1000 + i)
            .filter(|&now| ready(now, last_fired, 125))
            .count();
        // Never updating last_fired: every poll past the first period fires
        assert_eq!(fired, 100);
    }

    #[test]
    fn test_ready_with_update_fires_once_per_period() {
        let mut last_fired = 0;
        let mut fired = 0;
        for now in 0..1000u64 {
            if ready(now, last_fired, 125) {
                last_fired = now;
                fired += 1;
            }
        }
        // t = 125, 250, ..., 875
        assert_eq!(fired, 7);
    }

    #[test]
    fn test_clock_first_poll_fires() {
        let mut clock = SampleClock::new(125);
        assert!(clock.poll(42));
        assert!(!clock.poll(43));
        assert_eq!(clock.last_fired_us(), Some(42));
    }

    #[test]
    fn test_clock_no_drift_with_late_polls() {
        let mut clock = SampleClock::new(125);
        assert!(clock.poll(0));
        // Poll every 10 µs: late by up to 9 µs each time
        let mut fired = 0;
        for now in (10..=10_000u64).step_by(10) {
            if clock.poll(now) {
                fired += 1;
            }
        }
        // 10_000 / 125 = 80 periods
        assert_eq!(fired, 80);
        assert_eq!(clock.last_fired_us(), Some(10_000));
    }

    #[test]
    fn test_clock_resyncs_instead_of_bursting() {
        let mut clock = SampleClock::new(125);
        assert!(clock.poll(0));
        // Stalled for 10 periods
        assert!(clock.poll(1250));
        assert!(!clock.poll(1251));
        assert!(!clock.poll(1374));
        assert!(clock.poll(1375));
    }

    #[test]
    fn test_with_sample_rate() {
        assert_eq!(SampleClock::with_sample_rate(8000).period_us(), 125);
    }
}

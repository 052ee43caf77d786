//! Push-button debouncer.
//!
//! Buttons are wired to a pull-up, so released = high, pressed = low.
//! A press is recognized on the high → low transition, then the button
//! is disarmed for the re-arm window. The window is a timestamp check,
//! never a wait, so the sample clock keeps running.

/// Debounced button event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Button went down (falling edge on the active-low pin)
    Pressed,
}

/// Per-button debounce state.
#[derive(Clone, Copy, Debug)]
pub struct ButtonDebouncer {
    /// Last observed pin level (true = high = released)
    last_level: bool,
    /// Time of the last recognized edge
    last_edge_us: Option<u64>,
    /// Re-arm window in microseconds
    rearm_us: u64,
}

impl ButtonDebouncer {
    /// Create a debouncer with the given re-arm window in milliseconds.
    pub fn new(rearm_ms: u32) -> Self {
        Self {
            last_level: true,
            last_edge_us: None,
            rearm_us: rearm_ms as u64 * 1000,
        }
    }

    /// Feed one raw pin read.
    ///
    /// # Arguments
    /// * `now_us` - Current time in microseconds
    /// * `raw_level` - Pin level as read (true = high)
    ///
    /// # Returns
    /// `Some(Edge::Pressed)` exactly once per physical press.
    #[inline]
    pub fn poll(&mut self, now_us: u64, raw_level: bool) -> Option<Edge> {
        let falling = self.last_level && !raw_level;
        self.last_level = raw_level;

        if !falling || !self.is_armed(now_us) {
            return None;
        }

        self.last_edge_us = Some(now_us);
        Some(Edge::Pressed)
    }

    /// True if a falling edge at `now_us` would be recognized.
    #[inline]
    pub fn is_armed(&self, now_us: u64) -> bool {
        match self.last_edge_us {
            None => true,
            Some(last) => now_us.saturating_sub(last) >= self.rearm_us,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1000;

    #[test]
    fn test_press_yields_single_edge() {
        let mut btn = ButtonDebouncer::new(200);

        assert_eq!(btn.poll(0, true), None);
        assert_eq!(btn.poll(MS, false), Some(Edge::Pressed));

        // Held low: no repeat
        for t in 2..500 {
            assert_eq!(btn.poll(t * MS, false), None);
        }
    }

    #[test]
    fn test_release_raises_nothing() {
        let mut btn = ButtonDebouncer::new(200);
        btn.poll(0, false);
        assert_eq!(btn.poll(300 * MS, true), None);
    }

    #[test]
    fn test_bounce_within_window_suppressed() {
        let mut btn = ButtonDebouncer::new(200);

        assert_eq!(btn.poll(0, false), Some(Edge::Pressed));
        assert_eq!(btn.poll(5 * MS, true), None);
        assert_eq!(btn.poll(6 * MS, false), None);
        assert_eq!(btn.poll(199 * MS, true), None);
        assert_eq!(btn.poll(199 * MS + 500, false), None);
    }

    #[test]
    fn test_rearmed_after_window() {
        let mut btn = ButtonDebouncer::new(200);

        assert_eq!(btn.poll(0, false), Some(Edge::Pressed));
        assert_eq!(btn.poll(250 * MS, true), None);
        assert_eq!(btn.poll(260 * MS, false), Some(Edge::Pressed));
    }

    #[test]
    fn test_stuck_low_is_one_edge() {
        let mut btn = ButtonDebouncer::new(200);
        let edges = (0..10_000u64)
            .filter_map(|t| btn.poll(t * MS, false))
            .count();
        assert_eq!(edges, 1);
    }
}

use std::time::{Duration, Instant};

use tracing::debug;

/// Trailing-edge debounce: the deadline slides forward on every trigger and
/// fires only after the delay passes without a new one.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Consumes the deadline if it has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Debounced viewport geometry updates.
///
/// Resizes arrive in bursts while the user drags the window edge; the
/// reactor holds the newest size and releases it once the burst settles.
/// Orientation flips get a longer settle window because some platforms
/// deliver the rotated size in several steps.
#[derive(Debug, Clone)]
pub struct ViewportReactor {
    resize: Debouncer,
    orientation: Debouncer,
    pending: Option<(u32, u32)>,
}

impl ViewportReactor {
    pub fn new(resize_delay: Duration, orientation_delay: Duration) -> Self {
        Self {
            resize: Debouncer::new(resize_delay),
            orientation: Debouncer::new(orientation_delay),
            pending: None,
        }
    }

    pub fn record_resize(&mut self, width: u32, height: u32, now: Instant) {
        self.pending = Some((width, height));
        self.resize.trigger(now);
    }

    pub fn record_orientation_change(&mut self, width: u32, height: u32, now: Instant) {
        self.pending = Some((width, height));
        self.orientation.trigger(now);
        // An orientation flip also restarts the resize window; whichever
        // settles last releases the size.
        self.resize.trigger(now);
    }

    /// Releases the settled size, if any burst has finished.
    pub fn poll(&mut self, now: Instant) -> Option<(u32, u32)> {
        let resize_due = self.resize.fire(now);
        let orientation_due = self.orientation.fire(now);
        if !resize_due && !orientation_due {
            return None;
        }
        if self.orientation.next_deadline().is_some() || self.resize.next_deadline().is_some() {
            // The other window is still open; wait for it.
            return None;
        }
        let size = self.pending.take();
        if let Some((width, height)) = size {
            debug!(width, height, "viewport settled");
        }
        size
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.resize.next_deadline(), self.orientation.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debouncer_waits_out_the_delay() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.trigger(now);
        assert!(!debouncer.fire(now + Duration::from_millis(99)));
        assert!(debouncer.fire(now + Duration::from_millis(100)));
        assert!(!debouncer.fire(now + Duration::from_millis(200)), "consumed");
    }

    #[test]
    fn retrigger_extends_the_deadline() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.trigger(now);
        debouncer.trigger(now + Duration::from_millis(80));
        assert!(!debouncer.fire(now + Duration::from_millis(150)));
        assert!(debouncer.fire(now + Duration::from_millis(180)));
    }

    #[test]
    fn resize_burst_releases_only_the_final_size() {
        let now = Instant::now();
        let mut reactor =
            ViewportReactor::new(Duration::from_millis(100), Duration::from_millis(200));
        reactor.record_resize(800, 600, now);
        reactor.record_resize(900, 600, now + Duration::from_millis(50));
        reactor.record_resize(1000, 700, now + Duration::from_millis(90));

        assert_eq!(reactor.poll(now + Duration::from_millis(120)), None);
        assert_eq!(
            reactor.poll(now + Duration::from_millis(190)),
            Some((1000, 700))
        );
        assert_eq!(reactor.poll(now + Duration::from_millis(300)), None);
    }

    #[test]
    fn orientation_uses_the_longer_window() {
        let now = Instant::now();
        let mut reactor =
            ViewportReactor::new(Duration::from_millis(100), Duration::from_millis(200));
        reactor.record_orientation_change(600, 1000, now);

        // The short resize window elapses first but the orientation window
        // is still open, so nothing is released yet.
        assert_eq!(reactor.poll(now + Duration::from_millis(150)), None);
        assert_eq!(
            reactor.poll(now + Duration::from_millis(200)),
            Some((600, 1000))
        );
    }

    #[test]
    fn next_deadline_tracks_the_earliest_open_window() {
        let now = Instant::now();
        let mut reactor =
            ViewportReactor::new(Duration::from_millis(100), Duration::from_millis(200));
        assert_eq!(reactor.next_deadline(), None);
        reactor.record_resize(800, 600, now);
        assert_eq!(reactor.next_deadline(), Some(now + Duration::from_millis(100)));
    }
}

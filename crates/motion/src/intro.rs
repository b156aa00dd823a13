use std::time::{Duration, Instant};

/// UI side effects the host applies at fixed offsets after assets are ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiReveal {
    /// Canvas container begins its fade-in and scale-up.
    ContainerLoaded,
    /// Navigation bar glides down from the top.
    Nav,
    /// Hero panel rises into place.
    Hero,
    /// Scroll indicator appears once everything has settled.
    ScrollIndicator,
}

impl UiReveal {
    pub const ALL: [UiReveal; 4] = [
        UiReveal::ContainerLoaded,
        UiReveal::Nav,
        UiReveal::Hero,
        UiReveal::ScrollIndicator,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroTuning {
    pub container_delay: Duration,
    pub nav_delay: Duration,
    pub hero_delay: Duration,
    pub indicator_delay: Duration,
    /// How long frames are pumped unconditionally after asset-ready.
    pub pump_window: Duration,
}

impl Default for IntroTuning {
    fn default() -> Self {
        Self {
            container_delay: Duration::from_millis(300),
            nav_delay: Duration::from_millis(1000),
            hero_delay: Duration::from_millis(1600),
            indicator_delay: Duration::from_millis(3500),
            pump_window: Duration::from_millis(3500),
        }
    }
}

/// Wall-clock reveal sequence for the cinematic intro. Created when assets
/// become ready; polled with deadlines rather than timers so tests can drive
/// it with synthetic instants.
#[derive(Debug, Clone)]
pub struct IntroSequencer {
    started: Instant,
    steps: Vec<(Duration, UiReveal)>,
    cursor: usize,
    pump_window: Duration,
}

impl IntroSequencer {
    pub fn new(now: Instant, tuning: IntroTuning) -> Self {
        let mut steps = vec![
            (tuning.container_delay, UiReveal::ContainerLoaded),
            (tuning.nav_delay, UiReveal::Nav),
            (tuning.hero_delay, UiReveal::Hero),
            (tuning.indicator_delay, UiReveal::ScrollIndicator),
        ];
        steps.sort_by_key(|(delay, _)| *delay);
        Self {
            started: now,
            steps,
            cursor: 0,
            pump_window: tuning.pump_window,
        }
    }

    /// Returns every reveal whose offset has elapsed, in authored order.
    pub fn poll(&mut self, now: Instant) -> Vec<UiReveal> {
        let mut due = Vec::new();
        while let Some((delay, reveal)) = self.steps.get(self.cursor) {
            if now < self.started + *delay {
                break;
            }
            due.push(*reveal);
            self.cursor += 1;
        }
        due
    }

    pub fn pump_active(&self, now: Instant) -> bool {
        now < self.started + self.pump_window
    }

    /// All reveals fired and the pump window elapsed.
    pub fn finished(&self, now: Instant) -> bool {
        self.cursor == self.steps.len() && !self.pump_active(now)
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let step = self
            .steps
            .get(self.cursor)
            .map(|(delay, _)| self.started + *delay);
        let pump_end = self.started + self.pump_window;
        let pump = (now < pump_end).then_some(pump_end);
        match (step, pump) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (deadline, None) | (None, deadline) => deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_fire_in_order_at_their_offsets() {
        let start = Instant::now();
        let mut intro = IntroSequencer::new(start, IntroTuning::default());

        assert!(intro.poll(start + Duration::from_millis(100)).is_empty());
        assert_eq!(
            intro.poll(start + Duration::from_millis(350)),
            vec![UiReveal::ContainerLoaded]
        );
        // A late poll drains every elapsed step at once, still ordered.
        assert_eq!(
            intro.poll(start + Duration::from_millis(1700)),
            vec![UiReveal::Nav, UiReveal::Hero]
        );
        assert_eq!(
            intro.poll(start + Duration::from_secs(4)),
            vec![UiReveal::ScrollIndicator]
        );
        assert!(intro.poll(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn pump_covers_exactly_the_intro_window() {
        let start = Instant::now();
        let intro = IntroSequencer::new(start, IntroTuning::default());
        assert!(intro.pump_active(start));
        assert!(intro.pump_active(start + Duration::from_millis(3499)));
        assert!(!intro.pump_active(start + Duration::from_millis(3500)));
    }

    #[test]
    fn finished_requires_steps_and_pump() {
        let start = Instant::now();
        let mut intro = IntroSequencer::new(start, IntroTuning::default());
        let end = start + Duration::from_secs(4);
        assert!(!intro.finished(end), "steps not yet drained");
        intro.poll(end);
        assert!(intro.finished(end));
    }

    #[test]
    fn deadline_tracks_next_step_then_pump_end() {
        let start = Instant::now();
        let mut intro = IntroSequencer::new(start, IntroTuning::default());
        assert_eq!(
            intro.next_deadline(start),
            Some(start + Duration::from_millis(300))
        );
        intro.poll(start + Duration::from_secs(4));
        assert_eq!(intro.next_deadline(start + Duration::from_secs(4)), None);
    }
}

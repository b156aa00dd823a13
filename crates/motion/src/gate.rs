use std::time::{Duration, Instant};

use tracing::debug;

/// The model hides once the exit section's top crosses this fraction of the
/// viewport height.
const EXIT_TRIGGER_FRACTION: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    Hidden,
    Shown,
}

/// Hysteretic visibility gate for the model near the exit section.
///
/// Scrolling into the exit zone arms a delayed hide so a reader skimming
/// past does not see the model flicker out; scrolling back out cancels the
/// pending hide, and if the model had already hidden it is shown again
/// immediately. Each scroll cycle produces at most one `Hidden` and one
/// `Shown`.
#[derive(Debug, Clone)]
pub struct SectionGate {
    delay: Duration,
    hidden: bool,
    deadline: Option<Instant>,
}

impl SectionGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            hidden: false,
            deadline: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Feeds the gate the exit section's current top relative to the
    /// viewport. Returns `Shown` immediately on re-entry; `Hidden` arrives
    /// later via `poll` once the arm delay passes.
    pub fn observe(
        &mut self,
        section_top: f64,
        viewport_height: f64,
        now: Instant,
    ) -> Option<GateEvent> {
        let should_hide = section_top < viewport_height * EXIT_TRIGGER_FRACTION;
        if should_hide {
            if !self.hidden && self.deadline.is_none() {
                debug!("exit section entered; arming model hide");
                self.deadline = Some(now + self.delay);
            }
            None
        } else {
            self.deadline = None;
            if self.hidden {
                self.hidden = false;
                debug!("exit section left; showing model");
                Some(GateEvent::Shown)
            } else {
                None
            }
        }
    }

    /// Commits an armed hide once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<GateEvent> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.hidden = true;
                debug!("model hide committed");
                Some(GateEvent::Hidden)
            }
            _ => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(900);

    #[test]
    fn hide_commits_only_after_the_delay() {
        let now = Instant::now();
        let mut gate = SectionGate::new(DELAY);

        assert_eq!(gate.observe(300.0, 1000.0, now), None);
        assert_eq!(gate.poll(now + Duration::from_millis(899)), None);
        assert!(!gate.is_hidden());
        assert_eq!(
            gate.poll(now + Duration::from_millis(900)),
            Some(GateEvent::Hidden)
        );
        assert!(gate.is_hidden());
    }

    #[test]
    fn leaving_before_the_deadline_cancels_the_hide() {
        let now = Instant::now();
        let mut gate = SectionGate::new(DELAY);

        gate.observe(300.0, 1000.0, now);
        // Back above the trigger line before the delay elapses.
        assert_eq!(
            gate.observe(700.0, 1000.0, now + Duration::from_millis(500)),
            None,
            "never hidden, so no Shown event either"
        );
        assert_eq!(gate.poll(now + Duration::from_secs(5)), None);
        assert!(!gate.is_hidden());
    }

    #[test]
    fn reentry_shows_immediately() {
        let now = Instant::now();
        let mut gate = SectionGate::new(DELAY);

        gate.observe(300.0, 1000.0, now);
        gate.poll(now + DELAY);
        assert!(gate.is_hidden());

        assert_eq!(
            gate.observe(700.0, 1000.0, now + Duration::from_secs(2)),
            Some(GateEvent::Shown)
        );
        assert!(!gate.is_hidden());
    }

    #[test]
    fn repeated_observations_do_not_rearm_the_deadline() {
        let now = Instant::now();
        let mut gate = SectionGate::new(DELAY);

        gate.observe(300.0, 1000.0, now);
        // Continued scrolling inside the zone must not push the hide out.
        gate.observe(200.0, 1000.0, now + Duration::from_millis(500));
        assert_eq!(
            gate.poll(now + Duration::from_millis(900)),
            Some(GateEvent::Hidden)
        );
    }

    #[test]
    fn at_most_one_event_per_direction_per_cycle() {
        let now = Instant::now();
        let mut gate = SectionGate::new(DELAY);

        gate.observe(300.0, 1000.0, now);
        assert_eq!(gate.poll(now + DELAY), Some(GateEvent::Hidden));
        assert_eq!(gate.poll(now + DELAY * 2), None);

        assert_eq!(
            gate.observe(700.0, 1000.0, now + DELAY * 3),
            Some(GateEvent::Shown)
        );
        assert_eq!(gate.observe(700.0, 1000.0, now + DELAY * 3), None);
    }

    #[test]
    fn trigger_line_sits_at_forty_percent_of_the_viewport() {
        let now = Instant::now();
        let mut gate = SectionGate::new(DELAY);

        gate.observe(400.0, 1000.0, now);
        assert_eq!(gate.next_deadline(), None, "exactly on the line is visible");
        gate.observe(399.0, 1000.0, now);
        assert_eq!(gate.next_deadline(), Some(now + DELAY));
    }
}

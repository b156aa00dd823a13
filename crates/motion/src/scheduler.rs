use std::time::Instant;

use keyframes::{DeviceProfile, DeviceTier, Pose, Timeline};
use tracing::{debug, trace};

use crate::damper::{DamperTuning, PoseDamper};
use crate::intro::{IntroSequencer, IntroTuning, UiReveal};

/// Whether the tick chain is currently scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerTuning {
    pub intro: IntroTuning,
    /// Angular frequency of the desktop idle bob, radians per second.
    pub bob_frequency: f64,
    /// Peak vertical offset of the idle bob.
    pub bob_amplitude: f64,
}

impl Default for SchedulerTuning {
    fn default() -> Self {
        Self {
            intro: IntroTuning::default(),
            bob_frequency: 0.8,
            bob_amplitude: 0.012,
        }
    }
}

/// What the host should do with this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRequest {
    pub pose: Pose,
    /// False while the model is scrolled out of view: the pose keeps
    /// tracking scroll so there is no jump on reappearance, but the GPU
    /// draw call is skipped.
    pub submit: bool,
}

/// Demand-driven render scheduler.
///
/// Owns the loop state, the pose damper, and the intro sequence. Hosts feed
/// it events (`set_scroll_progress`, `set_page_visible`, ...) and call
/// `tick` once per display callback while `is_active`; a `None` tick means
/// the loop stopped and the redraw was stale. The loop self-terminates when
/// the damper converges and nothing demanded a frame, after emitting one
/// final exact-pose frame.
pub struct RenderScheduler {
    profile: DeviceProfile,
    timeline: Timeline,
    damper: PoseDamper,
    tuning: SchedulerTuning,
    state: LoopState,
    needs_frame: bool,
    page_visible: bool,
    context_lost: bool,
    model_hidden: bool,
    intro: Option<IntroSequencer>,
    intro_complete: bool,
    epoch: Instant,
    last_tick: Instant,
}

impl RenderScheduler {
    pub fn new(
        profile: DeviceProfile,
        timeline: Timeline,
        damper_tuning: DamperTuning,
        tuning: SchedulerTuning,
        now: Instant,
    ) -> Self {
        let initial = timeline.resolve(0.0);
        Self {
            profile,
            timeline,
            damper: PoseDamper::new(initial, damper_tuning),
            tuning,
            state: LoopState::Idle,
            needs_frame: false,
            page_visible: true,
            context_lost: false,
            model_hidden: false,
            intro: None,
            intro_complete: false,
            epoch: now,
            last_tick: now,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LoopState::Active
    }

    pub fn is_model_hidden(&self) -> bool {
        self.model_hidden
    }

    pub fn current_pose(&self) -> Pose {
        self.damper.current()
    }

    /// Marks a frame as wanted and starts the tick chain if it is idle.
    /// A hidden page or a lost graphics context keeps the loop stopped; the
    /// pending flag survives so the next resume picks the frame up.
    pub fn request_frame(&mut self, now: Instant) {
        self.needs_frame = true;
        if self.state == LoopState::Idle && self.page_visible && !self.context_lost {
            self.state = LoopState::Active;
            self.last_tick = now;
            trace!("render loop resumed");
        }
    }

    /// Hard stop; idempotent. In-flight redraws observe `Idle` and drop.
    pub fn stop(&mut self) {
        if self.state == LoopState::Active {
            trace!("render loop stopped");
        }
        self.state = LoopState::Idle;
        self.needs_frame = false;
    }

    /// New scroll progress from the binding: resolve the timeline into a
    /// fresh target and demand a frame. Under reduced motion the pose snaps
    /// instead of easing, so a single frame lands on the exact value.
    pub fn set_scroll_progress(&mut self, progress: f64, now: Instant) {
        let target = self.timeline.resolve(progress);
        if self.profile.reduced_motion {
            self.damper.snap_to(target);
        } else {
            self.damper.set_target(target);
        }
        self.request_frame(now);
    }

    pub fn set_page_visible(&mut self, visible: bool, now: Instant) {
        if visible == self.page_visible {
            return;
        }
        self.page_visible = visible;
        if visible {
            debug!("page visible; resuming render loop");
            self.request_frame(now);
        } else {
            debug!("page hidden; stopping render loop");
            self.stop();
        }
    }

    /// Gate outcome from the section geometry: hiding stops the loop (scroll
    /// events will restart it to keep the pose tracking), showing demands an
    /// immediate frame so the model reappears without a jump.
    pub fn set_model_hidden(&mut self, hidden: bool, now: Instant) {
        if hidden == self.model_hidden {
            return;
        }
        self.model_hidden = hidden;
        if hidden {
            debug!("model offscreen; suppressing draw submission");
            self.stop();
        } else {
            debug!("model back in view; resuming draw submission");
            self.request_frame(now);
        }
    }

    /// Context loss is fatal for rendering but not for the session: the
    /// loop parks until the context is restored.
    pub fn notify_context_lost(&mut self) {
        debug!("graphics context lost; parking render loop");
        self.context_lost = true;
        self.stop();
    }

    pub fn notify_context_restored(&mut self, now: Instant) {
        debug!("graphics context restored");
        self.context_lost = false;
        self.request_frame(now);
    }

    /// The external loader finished handing over the scene. Starts the
    /// cinematic intro; under reduced motion it instead snaps to the progress-0
    /// pose, requests exactly one frame, and returns every UI reveal for the
    /// host to apply synchronously.
    pub fn assets_ready(&mut self, now: Instant) -> Vec<UiReveal> {
        if self.profile.reduced_motion {
            let pose = self.timeline.resolve(0.0);
            self.damper.snap_to(pose);
            self.intro_complete = true;
            self.request_frame(now);
            return UiReveal::ALL.to_vec();
        }
        self.intro = Some(IntroSequencer::new(now, self.tuning.intro));
        self.request_frame(now);
        Vec::new()
    }

    /// Fires due intro reveals and retires the sequencer once its window has
    /// elapsed. Call from the host's wait loop before picking a control
    /// flow.
    pub fn poll_timers(&mut self, now: Instant) -> Vec<UiReveal> {
        let Some(intro) = self.intro.as_mut() else {
            return Vec::new();
        };
        let reveals = intro.poll(now);
        if reveals.contains(&UiReveal::ContainerLoaded) {
            // The container fade needs a frame behind it even if nothing is
            // scrolling yet.
            self.request_frame(now);
        }
        if self
            .intro
            .as_ref()
            .is_some_and(|intro| intro.finished(now))
        {
            self.intro = None;
            self.intro_complete = true;
            debug!("intro window elapsed; scheduling is demand-driven from here");
            if self.profile.tier == DeviceTier::Mobile {
                // Mobile skipped the pump; settle with one explicit frame.
                self.request_frame(now);
            }
        }
        reveals
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.intro.as_ref().and_then(|intro| intro.next_deadline(now))
    }

    /// One scheduler tick. Advances the damper by the elapsed wall-clock
    /// time, decides whether the chain continues, and hands the host the
    /// pose to apply. Returns `None` when the loop is idle (stale redraw).
    pub fn tick(&mut self, now: Instant) -> Option<FrameRequest> {
        if self.state != LoopState::Active {
            return None;
        }
        let dt = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        let pump = self.frame_pump_active(now);
        let converged = self.damper.advance(dt);
        let submit = !self.model_hidden;

        if converged && !pump {
            // Final frame at the exact target, then stop. The bob is left
            // out so the resting pose is the authored one.
            self.needs_frame = false;
            self.state = LoopState::Idle;
            debug!("pose converged; render loop idle");
            return Some(FrameRequest {
                pose: self.damper.current(),
                submit,
            });
        }

        self.needs_frame = false;
        let mut pose = self.damper.current();
        if self.bob_applies() {
            let elapsed = now.saturating_duration_since(self.epoch).as_secs_f64();
            pose.y += (elapsed * self.tuning.bob_frequency).sin() * self.tuning.bob_amplitude;
        }
        Some(FrameRequest { pose, submit })
    }

    /// During the intro window the scheduler demands frames unconditionally
    /// (tablet/desktop) so the fade/scale transitions stay smooth without
    /// scroll input.
    fn frame_pump_active(&self, now: Instant) -> bool {
        if self.profile.reduced_motion || self.profile.tier == DeviceTier::Mobile {
            return false;
        }
        self.intro
            .as_ref()
            .is_some_and(|intro| intro.pump_active(now))
    }

    /// Subtle floating motion, desktop only, driven by wall-clock time.
    fn bob_applies(&self) -> bool {
        self.profile.tier == DeviceTier::Desktop
            && !self.profile.reduced_motion
            && !self.intro_complete
    }
}

use std::time::Duration;

use keyframes::Pose;

/// Tuning for the exponential pose lerp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamperTuning {
    /// Rate constant `k` in `1 - e^(-k*dt)`.
    pub rate: f64,
    /// Per-field convergence tolerance.
    pub epsilon: f64,
    /// Maximum delta time folded into one advance; protects against a jump
    /// after the tab was hidden or the loop stalled.
    pub max_step: Duration,
}

impl Default for DamperTuning {
    fn default() -> Self {
        Self {
            rate: 8.0,
            epsilon: 5e-4,
            max_step: Duration::from_millis(50),
        }
    }
}

/// Eases `current` toward `target` with frame-rate-independent exponential
/// smoothing: the same wall-clock elapsed time yields the same blend ratio
/// regardless of how many ticks it is split across, which is why the factor
/// is exponential rather than linear.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseDamper {
    current: Pose,
    target: Pose,
    tuning: DamperTuning,
}

impl PoseDamper {
    pub fn new(initial: Pose, tuning: DamperTuning) -> Self {
        Self {
            current: initial,
            target: initial,
            tuning,
        }
    }

    pub fn current(&self) -> Pose {
        self.current
    }

    pub fn target(&self) -> Pose {
        self.target
    }

    pub fn set_target(&mut self, target: Pose) {
        self.target = target;
    }

    /// Moves both endpoints to `pose` at once (entrance override,
    /// reduced-motion snapshot).
    pub fn snap_to(&mut self, pose: Pose) {
        self.current = pose;
        self.target = pose;
    }

    pub fn is_converged(&self) -> bool {
        self.current
            .to_array()
            .into_iter()
            .zip(self.target.to_array())
            .all(|(cur, tgt)| (tgt - cur).abs() < self.tuning.epsilon)
    }

    /// Advances `current` toward `target` by the elapsed time and reports
    /// convergence. On convergence `current` is snapped to `target` exactly,
    /// removing residual floating-point drift. A zero `dt` moves nothing;
    /// negative deltas are unrepresentable as `Duration`.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let dt = dt.min(self.tuning.max_step).as_secs_f64();
        let factor = 1.0 - (-self.tuning.rate * dt).exp();

        let mut fields = self.current.to_array();
        for (cur, tgt) in fields.iter_mut().zip(self.target.to_array()) {
            *cur += (tgt - *cur) * factor;
        }
        self.current = Pose::from_array(fields);

        if self.is_converged() {
            self.current = self.target;
            true
        } else {
            false
        }
    }
}

use std::f64::consts::PI;

/// Yaw offset that presents the model's front face (the scene graph arrives
/// flipped 180 degrees around Z, so the front lands on odd multiples of pi).
pub const FRONT_FACE: f64 = PI;

/// Six-field transform applied to the rendered object: object position,
/// camera depth, and three rotation axes. Rotations are radians and
/// deliberately unbounded; multi-turn spins are authored as large multiples
/// of pi.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
}

impl Pose {
    pub fn to_array(self) -> [f64; 6] {
        [self.x, self.y, self.zoom, self.rot_x, self.rot_y, self.rot_z]
    }

    pub fn from_array(fields: [f64; 6]) -> Self {
        Self {
            x: fields[0],
            y: fields[1],
            zoom: fields[2],
            rot_x: fields[3],
            rot_y: fields[4],
            rot_z: fields[5],
        }
    }
}

/// An authored pose anchored to a scroll progress value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub anchor: f64,
    pub pose: Pose,
}

#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("timeline needs at least two keyframes, got {0}")]
    TooFewFrames(usize),
    #[error("first keyframe anchor must be 0.0, got {0}")]
    FirstAnchor(f64),
    #[error("last keyframe anchor must be 1.0, got {0}")]
    LastAnchor(f64),
    #[error("keyframe anchors must be strictly ascending ({prev} followed by {next})")]
    UnorderedAnchors { prev: f64, next: f64 },
    #[error("keyframe anchor {0} is not a finite number")]
    NonFiniteAnchor(f64),
}

/// An ordered sequence of keyframes spanning the full scroll range.
///
/// Built once at startup from the tier tables (or a config override), never
/// mutated afterwards. `resolve` is a pure function of `progress` and the
/// frames, so it is safe to call at any rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    frames: Vec<Keyframe>,
}

impl Timeline {
    pub fn new(frames: Vec<Keyframe>) -> Result<Self, TimelineError> {
        if frames.len() < 2 {
            return Err(TimelineError::TooFewFrames(frames.len()));
        }
        for frame in &frames {
            if !frame.anchor.is_finite() {
                return Err(TimelineError::NonFiniteAnchor(frame.anchor));
            }
        }
        let first = frames[0].anchor;
        if first != 0.0 {
            return Err(TimelineError::FirstAnchor(first));
        }
        let last = frames[frames.len() - 1].anchor;
        if last != 1.0 {
            return Err(TimelineError::LastAnchor(last));
        }
        for pair in frames.windows(2) {
            if pair[1].anchor <= pair[0].anchor {
                return Err(TimelineError::UnorderedAnchors {
                    prev: pair[0].anchor,
                    next: pair[1].anchor,
                });
            }
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    pub fn first_pose(&self) -> Pose {
        self.frames[0].pose
    }

    pub fn last_pose(&self) -> Pose {
        self.frames[self.frames.len() - 1].pose
    }

    /// Maps a scroll progress value onto an interpolated pose.
    ///
    /// Locates the first bracketing keyframe pair in anchor order, eases the
    /// local progress with a cubic in/out curve, and blends every pose field.
    /// Out-of-range and non-finite inputs clamp to the endpoint frames.
    pub fn resolve(&self, progress: f64) -> Pose {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if progress <= 0.0 {
            return self.first_pose();
        }
        if progress >= 1.0 {
            return self.last_pose();
        }

        let mut start = self.frames[0];
        let mut end = self.frames[self.frames.len() - 1];
        for pair in self.frames.windows(2) {
            if progress >= pair[0].anchor && progress <= pair[1].anchor {
                start = pair[0];
                end = pair[1];
                break;
            }
        }

        let range = end.anchor - start.anchor;
        let local = if range > 0.0 {
            (progress - start.anchor) / range
        } else {
            0.0
        };
        let eased = ease_in_out_cubic(local);

        let a = start.pose.to_array();
        let b = end.pose.to_array();
        let mut blended = [0.0; 6];
        for (slot, (a, b)) in blended.iter_mut().zip(a.into_iter().zip(b)) {
            *slot = lerp(a, b, eased);
        }
        Pose::from_array(blended)
    }
}

/// Cubic ease-in-out: accelerates through the first half, decelerates
/// through the second, and hits 0, 0.5, and 1 exactly.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Blend in the `a*(1-t) + b*t` form so t = 0 and t = 1 reproduce the
/// endpoints bitwise.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(x: f64, zoom: f64, rot_y: f64) -> Pose {
        Pose {
            x,
            zoom,
            rot_y,
            ..Pose::default()
        }
    }

    fn fixture() -> Timeline {
        Timeline::new(vec![
            Keyframe {
                anchor: 0.0,
                pose: pose(0.5, 10.0, FRONT_FACE),
            },
            Keyframe {
                anchor: 0.4,
                pose: pose(-0.6, 9.5, FRONT_FACE + PI),
            },
            Keyframe {
                anchor: 1.0,
                pose: pose(0.0, 13.0, FRONT_FACE + 3.0 * PI),
            },
        ])
        .expect("fixture timeline")
    }

    #[test]
    fn endpoints_resolve_exactly() {
        let timeline = fixture();
        assert_eq!(timeline.resolve(0.0), timeline.first_pose());
        assert_eq!(timeline.resolve(1.0), timeline.last_pose());
    }

    #[test]
    fn out_of_range_clamps_to_endpoints() {
        let timeline = fixture();
        assert_eq!(timeline.resolve(-0.3), timeline.first_pose());
        assert_eq!(timeline.resolve(1.7), timeline.last_pose());
        assert_eq!(timeline.resolve(f64::NAN), timeline.first_pose());
    }

    #[test]
    fn interior_anchor_resolves_to_its_keyframe() {
        let timeline = fixture();
        // Scanning in anchor order lands the anchor itself on the end of the
        // first qualifying bracket, where eased local progress is exactly 1.
        assert_eq!(timeline.resolve(0.4), timeline.frames()[1].pose);
    }

    #[test]
    fn output_is_continuous_at_keyframe_boundaries() {
        let timeline = fixture();
        for frame in &timeline.frames()[1..timeline.frames().len() - 1] {
            let before = timeline.resolve(frame.anchor - 1e-9).to_array();
            let after = timeline.resolve(frame.anchor + 1e-9).to_array();
            for (a, b) in before.into_iter().zip(after) {
                assert!((a - b).abs() < 1e-6, "jump at anchor {}", frame.anchor);
            }
        }
    }

    #[test]
    fn bracket_midpoint_is_arithmetic_mean() {
        let timeline = fixture();
        let mid = (0.0 + 0.4) / 2.0;
        let resolved = timeline.resolve(mid);
        let a = timeline.frames()[0].pose;
        let b = timeline.frames()[1].pose;
        assert!((resolved.rot_y - (a.rot_y + b.rot_y) / 2.0).abs() < 1e-9);
        assert!((resolved.x - (a.x + b.x) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn easing_hits_midpoint_exactly() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn easing_accelerates_then_decelerates() {
        let first = ease_in_out_cubic(0.25);
        let mid = ease_in_out_cubic(0.5);
        let last = ease_in_out_cubic(0.75);
        assert!(first < mid);
        assert!(last > mid);
        // Shallow at the edges, steep through the middle.
        assert!(first < 0.25);
        assert!(last > 0.75);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for step in 0..=100 {
            let sample = ease_in_out_cubic(step as f64 / 100.0);
            assert!(sample >= last);
            last = sample;
        }
    }

    #[test]
    fn validation_rejects_bad_timelines() {
        let single = vec![Keyframe {
            anchor: 0.0,
            pose: Pose::default(),
        }];
        assert!(matches!(
            Timeline::new(single),
            Err(TimelineError::TooFewFrames(1))
        ));

        let bad_first = vec![
            Keyframe {
                anchor: 0.1,
                pose: Pose::default(),
            },
            Keyframe {
                anchor: 1.0,
                pose: Pose::default(),
            },
        ];
        assert!(matches!(
            Timeline::new(bad_first),
            Err(TimelineError::FirstAnchor(_))
        ));

        let bad_last = vec![
            Keyframe {
                anchor: 0.0,
                pose: Pose::default(),
            },
            Keyframe {
                anchor: 0.9,
                pose: Pose::default(),
            },
        ];
        assert!(matches!(
            Timeline::new(bad_last),
            Err(TimelineError::LastAnchor(_))
        ));

        let unordered = vec![
            Keyframe {
                anchor: 0.0,
                pose: Pose::default(),
            },
            Keyframe {
                anchor: 0.5,
                pose: Pose::default(),
            },
            Keyframe {
                anchor: 0.5,
                pose: Pose::default(),
            },
            Keyframe {
                anchor: 1.0,
                pose: Pose::default(),
            },
        ];
        assert!(matches!(
            Timeline::new(unordered),
            Err(TimelineError::UnorderedAnchors { .. })
        ));
    }
}

use std::f64::consts::PI;

use crate::profile::DeviceTier;
use crate::timeline::{Keyframe, Pose, Timeline, FRONT_FACE};

fn frame(anchor: f64, x: f64, y: f64, zoom: f64, rot_y: f64) -> Keyframe {
    Keyframe {
        anchor,
        pose: Pose {
            x,
            y,
            zoom,
            rot_x: 0.0,
            rot_y,
            rot_z: 0.0,
        },
    }
}

/// Desktop journey: model sits opposite the text column, front face landing
/// on even pi multiples so it aligns with the content sections, and the
/// model exits (zoom out, drift left) before the final sections.
fn desktop() -> Timeline {
    Timeline::new(vec![
        frame(0.0, 0.5, 0.0, 10.0, FRONT_FACE),
        frame(0.072, 0.6, 0.0, 9.5, FRONT_FACE + PI * 0.15),
        frame(0.126, 0.0, 0.08, 10.0, FRONT_FACE + PI * 1.0),
        frame(0.18, -0.6, 0.0, 9.5, FRONT_FACE + PI * 2.0),
        frame(0.288, -0.55, 0.0, 9.5, FRONT_FACE + PI * 2.5),
        frame(0.36, 0.0, 0.08, 10.0, FRONT_FACE + PI * 3.0),
        frame(0.432, 0.6, 0.0, 9.5, FRONT_FACE + PI * 4.0),
        frame(0.558, 0.55, 0.0, 9.5, FRONT_FACE + PI * 4.5),
        frame(0.648, -0.3, 0.0, 12.0, FRONT_FACE + PI * 5.0),
        frame(0.82, -0.4, 0.0, 13.0, FRONT_FACE + PI * 6.0),
        frame(0.892, 0.0, 0.0, 13.0, FRONT_FACE + PI * 6.5),
        frame(1.0, 0.0, 0.0, 13.0, FRONT_FACE + PI * 7.0),
    ])
    .expect("built-in desktop timeline")
}

/// Tablet variant: same beats as desktop with gentler horizontal travel and
/// the model raised slightly to clear the narrower content column.
fn tablet() -> Timeline {
    Timeline::new(vec![
        frame(0.0, 0.3, 0.2, 10.0, FRONT_FACE),
        frame(0.072, 0.4, 0.2, 9.5, FRONT_FACE + PI * 0.15),
        frame(0.126, 0.0, 0.25, 10.0, FRONT_FACE + PI * 1.0),
        frame(0.198, -0.4, 0.2, 9.5, FRONT_FACE + PI * 2.0),
        frame(0.288, -0.35, 0.2, 9.5, FRONT_FACE + PI * 2.5),
        frame(0.36, 0.0, 0.25, 10.0, FRONT_FACE + PI * 3.0),
        frame(0.432, 0.4, 0.2, 9.5, FRONT_FACE + PI * 4.0),
        frame(0.558, 0.35, 0.2, 9.5, FRONT_FACE + PI * 4.5),
        frame(0.648, -0.2, 0.2, 12.0, FRONT_FACE + PI * 5.0),
        frame(0.82, -0.3, 0.2, 13.0, FRONT_FACE + PI * 6.0),
        frame(0.892, 0.0, 0.2, 13.0, FRONT_FACE + PI * 6.5),
        frame(1.0, 0.0, 0.2, 13.0, FRONT_FACE + PI * 7.0),
    ])
    .expect("built-in tablet timeline")
}

/// Mobile variant: the model is pinned to the upper third of the viewport
/// (y around 2.0) and spins slowly and continuously, lingering on the front
/// face between content sections.
fn mobile() -> Timeline {
    Timeline::new(vec![
        frame(0.0, 0.0, 2.2, 10.0, FRONT_FACE),
        frame(0.054, 0.0, 2.15, 10.0, FRONT_FACE + PI * 0.15),
        frame(0.099, 0.0, 2.0, 10.0, FRONT_FACE + PI * 0.5),
        frame(0.144, 0.0, 2.0, 10.0, FRONT_FACE + PI * 1.0),
        frame(0.198, 0.0, 2.0, 10.0, FRONT_FACE + PI * 1.5),
        frame(0.252, 0.0, 2.0, 10.0, FRONT_FACE + PI * 2.0),
        frame(0.315, 0.0, 2.0, 10.0, FRONT_FACE + PI * 2.5),
        frame(0.378, 0.0, 2.0, 10.0, FRONT_FACE + PI * 3.0),
        frame(0.45, 0.0, 2.0, 10.0, FRONT_FACE + PI * 3.5),
        frame(0.522, 0.0, 2.0, 10.0, FRONT_FACE + PI * 4.0),
        frame(0.594, 0.0, 2.0, 10.0, FRONT_FACE + PI * 4.5),
        frame(0.648, 0.0, 2.0, 10.0, FRONT_FACE + PI * 5.0),
        frame(0.802, 0.0, 2.0, 13.0, FRONT_FACE + PI * 5.5),
        frame(0.865, 0.0, 2.0, 14.0, FRONT_FACE + PI * 6.0),
        frame(1.0, 0.0, 2.0, 14.0, FRONT_FACE + PI * 7.0),
    ])
    .expect("built-in mobile timeline")
}

/// One timeline per device tier. Defaults to the built-in authored tables;
/// the config layer may replace individual tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTimelines {
    pub mobile: Timeline,
    pub tablet: Timeline,
    pub desktop: Timeline,
}

impl TierTimelines {
    pub fn built_in() -> Self {
        Self {
            mobile: mobile(),
            tablet: tablet(),
            desktop: desktop(),
        }
    }

    pub fn for_tier(&self, tier: DeviceTier) -> &Timeline {
        match tier {
            DeviceTier::Mobile => &self.mobile,
            DeviceTier::Tablet => &self.tablet,
            DeviceTier::Desktop => &self.desktop,
        }
    }

    pub fn select(&self, tier: DeviceTier) -> Timeline {
        self.for_tier(tier).clone()
    }
}

impl Default for TierTimelines {
    fn default() -> Self {
        Self::built_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_tables_span_the_scroll_range() {
        let tables = TierTimelines::built_in();
        for timeline in [&tables.mobile, &tables.tablet, &tables.desktop] {
            assert_eq!(timeline.frames()[0].anchor, 0.0);
            assert_eq!(timeline.frames()[timeline.frames().len() - 1].anchor, 1.0);
        }
    }

    #[test]
    fn desktop_hero_keyframe_resolves_exactly() {
        // 0.072 is an authored keyframe; local progress is 1.0 under any
        // easing, so the resolved pose must reproduce it bitwise.
        let timeline = TierTimelines::built_in().desktop;
        let pose = timeline.resolve(0.072);
        assert_eq!(pose.x, 0.6);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.zoom, 9.5);
        assert_eq!(pose.rot_y, FRONT_FACE + PI * 0.15);
    }

    #[test]
    fn desktop_midway_blends_the_benefits_bracket() {
        // 0.5 falls strictly between the 0.432 and 0.558 keyframes; the
        // eased curve passes through 0.5 at the bracket midpoint, so rot_y
        // lands on the arithmetic mean of the bracketing spins.
        let timeline = TierTimelines::built_in().desktop;
        let mid = (0.432 + 0.558) / 2.0;
        let pose = timeline.resolve(mid);
        let lo = FRONT_FACE + PI * 4.0;
        let hi = FRONT_FACE + PI * 4.5;
        assert!((pose.rot_y - (lo + hi) / 2.0).abs() < 1e-9);
        assert!(pose.rot_y > lo && pose.rot_y < hi);
    }

    #[test]
    fn tier_selection_returns_matching_table() {
        let tables = TierTimelines::built_in();
        assert_eq!(
            tables.for_tier(DeviceTier::Mobile).first_pose().y,
            2.2,
            "mobile table pins the model to the upper viewport"
        );
        assert_eq!(tables.for_tier(DeviceTier::Desktop).first_pose().x, 0.5);
        assert_eq!(tables.select(DeviceTier::Tablet), tables.tablet);
    }
}

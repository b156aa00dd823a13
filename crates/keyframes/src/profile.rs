use std::fmt;

/// Widest viewport still treated as a phone.
const MOBILE_MAX_WIDTH: u32 = 768;
/// Widest viewport still treated as a tablet.
const TABLET_MAX_WIDTH: u32 = 1199;

/// Coarse device class used to pick a keyframe timeline and rendering
/// quality. Computed once from the startup viewport width; a resize later in
/// the session only adjusts the camera aspect, never the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceTier {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceTier {
    pub fn from_viewport_width(width: u32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            DeviceTier::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            DeviceTier::Tablet
        } else {
            DeviceTier::Desktop
        }
    }
}

impl fmt::Display for DeviceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceTier::Mobile => f.write_str("mobile"),
            DeviceTier::Tablet => f.write_str("tablet"),
            DeviceTier::Desktop => f.write_str("desktop"),
        }
    }
}

/// Immutable per-session profile handed to the timeline selection and the
/// scheduler at construction time. Deliberately a plain value rather than a
/// process-wide singleton so tests can inject synthetic tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub tier: DeviceTier,
    /// OS-level "prefers reduced motion" accessibility setting.
    pub reduced_motion: bool,
}

impl DeviceProfile {
    pub fn detect(viewport_width: u32, reduced_motion: bool) -> Self {
        Self {
            tier: DeviceTier::from_viewport_width(viewport_width),
            reduced_motion,
        }
    }
}

//! Keyframe data model for the scroll-driven showcase.
//!
//! This crate owns everything that is pure data plus lookup: the device
//! profile computed once at startup, the six-field pose, the per-tier
//! keyframe timelines with their eased interpolation, and the optional TOML
//! configuration layer that overrides the built-in tables and tuning knobs.
//! Nothing in here touches a clock or a GPU; the `motion` crate drives these
//! types from the render scheduler.

mod config;
mod profile;
mod tables;
mod timeline;

pub use config::{
    ConfigError, DampingConfig, KeyframeSpec, SceneConfig, StageConfig, TimelineOverrides,
    TimingConfig,
};
pub use profile::{DeviceProfile, DeviceTier};
pub use tables::TierTimelines;
pub use timeline::{ease_in_out_cubic, Keyframe, Pose, Timeline, TimelineError, FRONT_FACE};

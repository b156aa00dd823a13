//! Windowed host for the scroll-driven showcase.
//!
//! Owns the winit event loop and the wgpu surface, feeds scroll and
//! visibility events into the motion layer, and draws the showcase scene
//! whenever the scheduler asks for a frame.

mod gpu;
mod ui;
mod window;

use std::time::Duration;

use anyhow::Result;
use keyframes::{DeviceProfile, TierTimelines};
use motion::{DamperTuning, SchedulerTuning};

/// Everything the window host needs, resolved from config and CLI upstream.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub surface_size: (u32, u32),
    pub profile: DeviceProfile,
    pub timelines: TierTimelines,
    pub damper: DamperTuning,
    pub scheduler: SchedulerTuning,
    /// Height of the virtual page the wheel scrolls through, in pixels.
    pub document_height: f64,
    /// Document fraction where the exit section begins; the model hides
    /// once that section nears the top of the viewport.
    pub exit_section: f64,
    pub hide_delay: Duration,
    pub resize_debounce: Duration,
    pub orientation_debounce: Duration,
}

pub fn run(config: ViewerConfig) -> Result<()> {
    window::run(config)
}

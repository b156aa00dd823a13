//! Demand-driven animation engine for the scroll showcase.
//!
//! The engine translates host events (scroll, resize, visibility, context
//! loss) into pose updates and decides on each tick whether a GPU frame is
//! actually worth producing. Everything takes an explicit `Instant`, so the
//! whole state machine can be unit tested with synthetic time; no module in
//! this crate reads a clock or touches the platform.
//!
//! ```text
//!   host events ──▶ ScrollBinding / ViewportReactor / SectionGate
//!                         │ progress, refresh, hide/show
//!                         ▼
//!                  RenderScheduler ──▶ Timeline::resolve ──▶ target pose
//!                         │ tick(now)
//!                         ▼
//!                    PoseDamper ──▶ FrameRequest { pose, submit }
//! ```

mod damper;
mod gate;
mod intro;
mod scheduler;
mod scroll;
mod viewport;

pub use damper::{DamperTuning, PoseDamper};
pub use gate::{GateEvent, SectionGate};
pub use intro::{IntroSequencer, IntroTuning, UiReveal};
pub use scheduler::{FrameRequest, LoopState, RenderScheduler, SchedulerTuning};
pub use scroll::{ScrollBinding, ScrollSample};
pub use viewport::{Debouncer, ViewportReactor};

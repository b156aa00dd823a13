use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{Event, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use motion::{GateEvent, RenderScheduler, ScrollBinding, SectionGate, ViewportReactor};

use crate::gpu::{GpuContext, ShowcaseScene};
use crate::ui::UiState;
use crate::ViewerConfig;

/// Wheel lines map to this many virtual pixels, roughly one text line.
const SCROLL_LINE_PX: f64 = 53.0;

struct StageState {
    window: Arc<Window>,
    // None when surface creation failed; the page stays interactive and
    // only the draw calls are skipped.
    gpu: Option<(GpuContext, ShowcaseScene)>,
    scheduler: RenderScheduler,
    scroll: ScrollBinding,
    gate: SectionGate,
    reactor: ViewportReactor,
    ui: UiState,
    document_height: f64,
    exit_section: f64,
    portrait: bool,
}

impl StageState {
    fn new(window: Arc<Window>, config: &ViewerConfig, now: Instant) -> Self {
        let size = window.inner_size();
        let gpu = match GpuContext::new(window.as_ref(), size) {
            Ok(ctx) => {
                let scene = ShowcaseScene::new(&ctx);
                Some((ctx, scene))
            }
            Err(err) => {
                error!("failed to initialise GPU surface: {err:?}");
                None
            }
        };

        let timeline = config.timelines.select(config.profile.tier);
        let mut scheduler = RenderScheduler::new(
            config.profile,
            timeline,
            config.damper,
            config.scheduler,
            now,
        );

        let mut ui = UiState::default();
        // The scene is built synchronously here, so asset readiness fires
        // straight away. A context failure still dismisses the loading
        // indicator; the reader gets the page without the model.
        ui.dismiss_loading();
        for reveal in scheduler.assets_ready(now) {
            ui.apply(reveal);
        }

        Self {
            window,
            gpu,
            scheduler,
            scroll: ScrollBinding::new(config.document_height, size.height.max(1) as f64),
            gate: SectionGate::new(config.hide_delay),
            reactor: ViewportReactor::new(config.resize_debounce, config.orientation_debounce),
            ui,
            document_height: config.document_height,
            exit_section: config.exit_section,
            portrait: size.height > size.width,
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta, now: Instant) {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, lines) => -f64::from(lines) * SCROLL_LINE_PX,
            MouseScrollDelta::PixelDelta(position) => -position.y,
        };
        if self.scroll.record_scroll_delta(delta_y) {
            // First event of the cycle; the sample is consumed from the
            // wait handler so later events in the same burst coalesce.
            self.scheduler.request_frame(now);
        }
    }

    fn handle_resized(&mut self, new_size: PhysicalSize<u32>, now: Instant) {
        let portrait = new_size.height > new_size.width;
        if portrait != self.portrait {
            self.portrait = portrait;
            self.reactor
                .record_orientation_change(new_size.width, new_size.height, now);
        } else {
            self.reactor.record_resize(new_size.width, new_size.height, now);
        }
    }

    /// Runs the deferred work queues: the coalesced scroll sample, intro
    /// timers, the settled viewport size, and the hide gate.
    fn pump(&mut self, now: Instant) {
        if let Some(sample) = self.scroll.take_sample() {
            self.scheduler.set_scroll_progress(sample.progress, now);
            self.ui.set_indicator_faded(sample.indicator_hidden);

            let exit_top = self.exit_section * self.document_height - sample.scroll_y;
            let viewport_height = self.window.inner_size().height.max(1) as f64;
            if let Some(GateEvent::Shown) = self.gate.observe(exit_top, viewport_height, now) {
                self.scheduler.set_model_hidden(false, now);
            }
        }

        for reveal in self.scheduler.poll_timers(now) {
            self.ui.apply(reveal);
        }

        if let Some(GateEvent::Hidden) = self.gate.poll(now) {
            self.scheduler.set_model_hidden(true, now);
        }

        if let Some((width, height)) = self.reactor.poll(now) {
            info!(width, height, "applying settled viewport size");
            if let Some((ctx, _)) = self.gpu.as_mut() {
                ctx.resize(PhysicalSize::new(width, height));
            }
            self.scroll.set_viewport_height(height.max(1) as f64);
            // Re-resolve the pose for the new geometry; the tier itself is
            // fixed for the session.
            self.scheduler
                .set_scroll_progress(self.scroll.progress(), now);
        }
    }

    fn render(&mut self, now: Instant) {
        let Some(frame) = self.scheduler.tick(now) else {
            return;
        };
        if !frame.submit {
            return;
        }
        let Some((ctx, scene)) = self.gpu.as_mut() else {
            return;
        };
        match scene.render(ctx, frame.pose) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated; reconfiguring");
                let size = ctx.size;
                ctx.resize(size);
                self.scheduler.request_frame(now);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("surface out of memory; disabling rendering");
                self.gpu = None;
                self.scheduler.notify_context_lost();
            }
            Err(err) => {
                warn!("surface error: {err:?}; retrying next frame");
                self.scheduler.request_frame(now);
            }
        }
    }

    fn next_deadline(&self, now: Instant) -> Option<Instant> {
        [
            self.scheduler.next_deadline(now),
            self.gate.next_deadline(),
            self.reactor.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

pub(crate) fn run(config: ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title("Scroll Stage")
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    info!(
        tier = %config.profile.tier,
        reduced_motion = config.profile.reduced_motion,
        width = window_size.width,
        height = window_size.height,
        "starting scroll stage"
    );

    let mut state = StageState::new(window.clone(), &config, Instant::now());

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        state.handle_wheel(delta, Instant::now());
                    }
                    WindowEvent::Occluded(occluded) => {
                        state.scheduler.set_page_visible(!occluded, Instant::now());
                    }
                    WindowEvent::Resized(new_size) => {
                        state.handle_resized(new_size, Instant::now());
                    }
                    WindowEvent::RedrawRequested => {
                        state.render(Instant::now());
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                state.pump(now);
                if state.scheduler.is_active() {
                    state.window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = state.next_deadline(now) {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))?;

    Ok(())
}

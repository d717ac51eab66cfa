use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{FrameLoop, Render, RunConfig};
use crate::device::{BlitRenderer, Gpu, SurfaceErrorAction};
use crate::input::{EventQueue, InputEvent};
use crate::time::FramePacer;

/// Entry point for the windowed runtime.
///
/// `run` blocks until the loop terminates. The per-iteration sequence is
/// fixed: drain input events, clear + render, present, pace. The window
/// and GPU pair is torn down on every exit path, including a renderer
/// error, which is stored during the loop and returned only after
/// teardown.
pub struct Runtime;

impl Runtime {
    pub fn run(config: RunConfig, renderer: Box<dyn Render>) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let mut shell = Shell::new(config, renderer);
        event_loop
            .run_app(&mut shell)
            .context("winit event loop terminated with error")?;

        shell.into_result()
    }
}

/// Ties the wgpu surface borrow to the window that owns it.
#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Shell {
    config: RunConfig,
    renderer: Box<dyn Render>,
    frame_loop: FrameLoop,
    events: EventQueue,
    pacer: FramePacer,

    entry: Option<WindowEntry>,
    blit: Option<BlitRenderer>,
    window_id: Option<WindowId>,

    error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl Shell {
    fn new(config: RunConfig, renderer: Box<dyn Render>) -> Self {
        let frame_loop = FrameLoop::new(&config);
        let pacer = FramePacer::new(config.target_rate);
        Self {
            config,
            renderer,
            frame_loop,
            events: EventQueue::new(),
            pacer,
            entry: None,
            blit: None,
            window_id: None,
            error: None,
            exit_requested: false,
        }
    }

    fn into_result(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.caption.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(self.config.width),
                f64::from(self.config.height),
            ))
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let blit = entry.with_gpu(|gpu| {
            BlitRenderer::new(
                gpu.device(),
                gpu.surface_format(),
                self.config.width,
                self.config.height,
            )
        });

        self.window_id = Some(entry.with_window(|w| w.id()));
        self.entry = Some(entry);
        self.blit = Some(blit);
        Ok(())
    }

    /// One loop iteration, driven by `RedrawRequested`.
    fn drive_frame(&mut self, event_loop: &ActiveEventLoop) {
        self.frame_loop.pump(&mut self.events);

        if let Err(err) = self.frame_loop.frame(self.renderer.as_mut()) {
            self.fail(event_loop, err);
            return;
        }

        if let Err(err) = self.present() {
            self.fail(event_loop, err);
            return;
        }

        self.pacer.pace();

        // The stop flag is consulted only here, after the batch's frame
        // completed; a quit event never cuts an iteration short.
        if !self.frame_loop.running() {
            self.shutdown(event_loop);
        }
    }

    /// Uploads and blits the surface. Transient surface errors drop the
    /// frame and resume; only fatal ones are returned.
    fn present(&mut self) -> Result<()> {
        let (Some(entry), Some(blit)) = (self.entry.as_mut(), self.blit.as_ref()) else {
            return Ok(());
        };
        let surface = self.frame_loop.surface();

        let mut fatal = None;
        entry.with_gpu_mut(|gpu| {
            let frame = match gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    if gpu.handle_surface_error(err.clone()) == SurfaceErrorAction::Fatal {
                        fatal = Some(err);
                    }
                    return;
                }
            };

            blit.upload(gpu.queue(), surface);
            let mut frame = frame;
            blit.draw(&mut frame.encoder, &frame.view);
            gpu.submit(frame);
        });

        match fatal {
            Some(err) => Err(anyhow!("fatal surface error: {err}")),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        self.shutdown(event_loop);
    }

    /// Unconditional teardown: the GPU/window pair is dropped here, before
    /// any stored error propagates out of `run`.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.blit = None;
        self.entry = None;
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
            return;
        }

        // Window/GPU setup can take long enough to distort the first tick.
        self.pacer.reset();
        log::info!(
            "window \"{}\" opened at {}x{}, target {} fps",
            self.config.caption,
            self.config.width,
            self.config.height,
            self.config.target_rate
        );
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: each presented frame schedules the next.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.entry.is_none() || Some(window_id) != self.window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                // Queued, not acted on: the next pump latches the stop flag
                // and that iteration still renders and presents.
                self.events.push(InputEvent::Quit);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.events.push(InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseInput { state, .. } => {
                self.events.push(InputEvent::PointerButton {
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = &mut self.entry {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = &mut self.entry {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => self.drive_frame(event_loop),

            _ => {}
        }
    }
}

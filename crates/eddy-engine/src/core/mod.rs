//! Core run-loop contracts.
//!
//! This module defines the stable interface between the windowed runtime
//! and caller code: the validated run configuration, the renderer contract,
//! and the per-iteration loop state. The winit/GPU shell lives in
//! `window`/`device`; everything here is headless and directly testable.

mod config;
mod render;
mod run_loop;

pub use config::{ConfigError, RunConfig};
pub use render::{FallbackRender, Render};
pub use run_loop::FrameLoop;

use anyhow::Result;

/// Opens a window described by `config` and invokes `renderer` once per
/// frame until a quit event.
///
/// Fails fast on an invalid configuration before any window exists. When
/// `renderer` is `None`, the fallback diagnostic renderer is substituted
/// here, exactly once; the loop body never branches on its presence. The
/// windowing subsystem is torn down on every exit path, including a
/// renderer error, before that error propagates to the caller.
pub fn run(config: RunConfig, renderer: Option<Box<dyn Render>>) -> Result<()> {
    config.validate()?;
    let renderer = renderer.unwrap_or_else(|| Box::new(FallbackRender::new()));
    crate::window::Runtime::run(config, renderer)
}

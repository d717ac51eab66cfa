//! GPU presentation.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - uploading the CPU pixel surface to a texture and blitting it to the
//!   swapchain once per frame
//!
//! Nothing here is visible to render callbacks; they only ever see the CPU
//! surface.

mod blit;
mod gpu;

pub use blit::BlitRenderer;
pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};

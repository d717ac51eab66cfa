//! Time subsystem.
//!
//! Fixed-rate frame pacing, decoupled from the runtime so it stays
//! testable. Intended usage:
//! - one `FramePacer` per run-loop invocation, never shared
//! - call `pace()` once per presented frame; it blocks out the remainder of
//!   the target period and returns a `FrameTime` snapshot

mod pacer;

pub use pacer::{FramePacer, FrameTime};

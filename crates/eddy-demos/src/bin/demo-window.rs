//! Opens an empty captioned window.
//!
//! No renderer is supplied, so the engine's fallback diagnostic renderer
//! takes over and the sentinel clear color fills the frame.

use anyhow::Result;

use eddy_engine::logging::{init_logging, LoggingConfig};
use eddy_engine::{run, RunConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    run(RunConfig::new(1280, 720, "eddy: empty window"), None)
}

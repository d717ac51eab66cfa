use std::fmt;

use crate::paint::Color;

/// Immutable configuration for one invocation of [`run`](crate::run).
///
/// The clear color is an explicit per-invocation field rather than a
/// process-wide constant; it defaults to the magenta sentinel so
/// un-rendered regions stand out.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Window and surface width in pixels.
    pub width: u32,

    /// Window and surface height in pixels.
    pub height: u32,

    /// Window title.
    pub caption: String,

    /// Target update rate in frames per second.
    pub target_rate: f32,

    /// Color the surface is cleared to at setup and before each frame.
    pub clear_color: Color,
}

impl RunConfig {
    pub fn new(width: u32, height: u32, caption: impl Into<String>) -> Self {
        Self {
            width,
            height,
            caption: caption.into(),
            target_rate: 60.0,
            clear_color: Color::CLEAR_SENTINEL,
        }
    }

    pub fn target_rate(mut self, rate: f32) -> Self {
        self.target_rate = rate;
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Checks the loop preconditions.
    ///
    /// Runs before any window or GPU resource is created so a bad
    /// configuration never leaves anything to tear down.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::new("width must be positive"));
        }
        if self.height == 0 {
            return Err(ConfigError::new("height must be positive"));
        }
        if !self.target_rate.is_finite() || self.target_rate <= 0.0 {
            return Err(ConfigError::new(format!(
                "target rate must be a positive number, got {}",
                self.target_rate
            )));
        }
        Ok(())
    }
}

/// Rejected run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid run configuration: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes() {
        assert!(RunConfig::new(100, 100, "t").validate().is_ok());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(RunConfig::new(0, 100, "t").validate().is_err());
        assert!(RunConfig::new(100, 0, "t").validate().is_err());
    }

    #[test]
    fn non_positive_or_non_finite_rates_are_rejected() {
        assert!(RunConfig::new(100, 100, "t").target_rate(0.0).validate().is_err());
        assert!(RunConfig::new(100, 100, "t").target_rate(-60.0).validate().is_err());
        assert!(RunConfig::new(100, 100, "t").target_rate(f32::NAN).validate().is_err());
        assert!(RunConfig::new(100, 100, "t").target_rate(f32::INFINITY).validate().is_err());
    }

    #[test]
    fn defaults_are_sixty_fps_and_the_sentinel_clear() {
        let cfg = RunConfig::new(1, 1, "t");
        assert_eq!(cfg.target_rate, 60.0);
        assert_eq!(cfg.clear_color, Color::CLEAR_SENTINEL);
    }
}

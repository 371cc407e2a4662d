#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! [`PanelConfig`] and [`AxisConfig`] carry the tunables the engines need at
//! construction. With the `config` feature both can be loaded from TOML or
//! JSON; missing fields fall back to their defaults.
//!
//! ```toml
//! # floatpane.toml
//! [min_size]
//! width = 350
//! height = 400
//!
//! [viewport]
//! width = 1280
//! height = 720
//! ```
//!
//! ```rust,ignore
//! let config = PanelConfig::from_toml_str(text)?;
//! ```

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use floatpane_core::{PartialSize, Size};

/// Viewport assumed until the host reports one.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280, 720);

/// Construction settings for [`crate::PanelEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PanelConfig {
    /// Resize floor; unset dimensions default to zero.
    pub min_size: PartialSize,
    /// Initial viewport (window inner size).
    pub viewport: Size,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_size: PartialSize::UNSET,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

impl PanelConfig {
    /// Resolved resize floor.
    #[must_use]
    pub fn min_size(&self) -> Size {
        self.min_size.or_zero()
    }

    /// Check parameters are within acceptable ranges.
    ///
    /// Returns one message per problem; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = validate_viewport(self.viewport);
        if self.min_size.width.is_some_and(|w| w < 0) {
            errors.push("min_size.width must be >= 0".into());
        }
        if self.min_size.height.is_some_and(|h| h < 0) {
            errors.push("min_size.height must be >= 0".into());
        }
        errors
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Construction settings for [`crate::AxisDragEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AxisConfig {
    /// Vertical offset applied at construction when non-negative.
    pub initial_y: Option<i32>,
    /// Initial viewport (window inner size).
    pub viewport: Size,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            initial_y: None,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        validate_viewport(self.viewport)
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn validate_viewport(viewport: Size) -> Vec<String> {
    let mut errors = Vec::new();
    if viewport.width < 0 {
        errors.push(format!(
            "viewport.width must be >= 0, got {}",
            viewport.width
        ));
    }
    if viewport.height < 0 {
        errors.push(format!(
            "viewport.height must be >= 0, got {}",
            viewport.height
        ));
    }
    errors
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PanelConfig::default().validate().is_empty());
        assert!(AxisConfig::default().validate().is_empty());
        assert_eq!(PanelConfig::default().min_size(), Size::new(0, 0));
    }

    #[test]
    fn partial_min_size_merges_over_zero() {
        let config = PanelConfig {
            min_size: PartialSize {
                width: Some(350),
                height: None,
            },
            ..PanelConfig::default()
        };
        assert_eq!(config.min_size(), Size::new(350, 0));
    }

    #[test]
    fn negative_values_rejected() {
        let config = PanelConfig {
            min_size: PartialSize::new(-1, 10),
            viewport: Size::new(-5, 100),
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("viewport.width"));
        assert!(errors[1].contains("min_size.width"));
    }

    #[test]
    fn validation_error_display() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trip_with_defaults() {
        let config = PanelConfig::from_toml_str(
            "[min_size]\nwidth = 350\nheight = 400\n",
        )
        .expect("valid toml");
        assert_eq!(config.min_size(), Size::new(350, 400));
        assert_eq!(config.viewport, DEFAULT_VIEWPORT);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_axis_config() {
        let config = AxisConfig::from_json_str(r#"{"initial_y": 200}"#).expect("valid json");
        assert_eq!(config.initial_y, Some(200));
    }

    #[cfg(feature = "config")]
    #[test]
    fn invalid_toml_reports_validation() {
        let err = PanelConfig::from_toml_str("[viewport]\nwidth = -1\nheight = 10\n")
            .expect_err("negative viewport");
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}

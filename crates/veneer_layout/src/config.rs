//! Scroll area configuration
//!
//! Loaded from TOML; every field is optional and falls back to its default.
//!
//! ```toml
//! auto_hide_delay_ms = 1500
//! shadow_threshold = 50.0
//! thumb_anchor = "center"
//! content_extent = "native_overflow"
//!
//! [visibility]
//! mobile = "never"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drag::ThumbAnchor;
use crate::error::{ConfigError, Result};
use crate::geometry::ContentExtentSource;
use crate::shadow::DEFAULT_SHADOW_THRESHOLD;
use crate::visibility::{ScrollbarVisibility, VisibilityByDevice};

/// Scroll area configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScrollAreaConfig {
    /// Delay before revealed bars hide again, in milliseconds
    #[serde(default = "default_auto_hide_delay_ms")]
    pub auto_hide_delay_ms: u64,
    /// Distance (px) from an edge at which its shadow reaches full opacity
    #[serde(default = "default_shadow_threshold")]
    pub shadow_threshold: f32,
    /// Track thickness (px), used to inset the bottom shadow
    #[serde(default = "default_track_thickness")]
    pub track_thickness: f32,
    #[serde(default)]
    pub thumb_anchor: ThumbAnchor,
    #[serde(default)]
    pub content_extent: ContentExtentSource,
    #[serde(default)]
    pub visibility: VisibilityByDevice,
}

fn default_auto_hide_delay_ms() -> u64 {
    1_500
}

fn default_shadow_threshold() -> f32 {
    DEFAULT_SHADOW_THRESHOLD
}

fn default_track_thickness() -> f32 {
    8.0
}

impl Default for ScrollAreaConfig {
    fn default() -> Self {
        Self {
            auto_hide_delay_ms: default_auto_hide_delay_ms(),
            shadow_threshold: default_shadow_threshold(),
            track_thickness: default_track_thickness(),
            thumb_anchor: ThumbAnchor::default(),
            content_extent: ContentExtentSource::default(),
            visibility: VisibilityByDevice::default(),
        }
    }
}

impl ScrollAreaConfig {
    /// Bars visible whenever their axis is scrollable
    pub fn always_visible() -> Self {
        Self {
            visibility: VisibilityByDevice::uniform(ScrollbarVisibility::Always),
            ..Default::default()
        }
    }

    /// Bars never drawn; content still scrolls natively
    pub fn hidden() -> Self {
        Self {
            visibility: VisibilityByDevice::uniform(ScrollbarVisibility::Never),
            ..Default::default()
        }
    }

    pub fn with_auto_hide_delay(mut self, delay: Duration) -> Self {
        self.auto_hide_delay_ms = delay.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn with_thumb_anchor(mut self, anchor: ThumbAnchor) -> Self {
        self.thumb_anchor = anchor;
        self
    }

    pub fn with_content_extent(mut self, source: ContentExtentSource) -> Self {
        self.content_extent = source;
        self
    }

    pub fn auto_hide_delay(&self) -> Duration {
        Duration::from_millis(self.auto_hide_delay_ms)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ScrollAreaConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the overlay cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.auto_hide_delay_ms == 0 {
            return Err(invalid("auto_hide_delay_ms", "must be greater than 0"));
        }
        if !(self.shadow_threshold.is_finite() && self.shadow_threshold > 0.0) {
            return Err(invalid(
                "shadow_threshold",
                format!("must be a positive number, got {}", self.shadow_threshold),
            ));
        }
        if !(self.track_thickness.is_finite() && self.track_thickness >= 0.0) {
            return Err(invalid(
                "track_thickness",
                format!("must be a non-negative number, got {}", self.track_thickness),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    let reason = reason.into();
    tracing::warn!(field, %reason, "rejected scroll area config");
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responsive::DeviceClass;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ScrollAreaConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScrollAreaConfig::default());
        assert_eq!(config.auto_hide_delay(), Duration::from_millis(1_500));
        assert_eq!(config.shadow_threshold, 50.0);
        assert_eq!(config.thumb_anchor, ThumbAnchor::Center);
    }

    #[test]
    fn test_partial_document() {
        let config = ScrollAreaConfig::from_toml_str(
            r#"
            auto_hide_delay_ms = 1750
            thumb_anchor = "leading_edge"
            content_extent = "measured_content"

            [visibility]
            mobile = "never"
            "#,
        )
        .unwrap();

        assert_eq!(config.auto_hide_delay_ms, 1_750);
        assert_eq!(config.thumb_anchor, ThumbAnchor::LeadingEdge);
        assert_eq!(config.content_extent, ContentExtentSource::MeasuredContent);
        assert_eq!(
            config.visibility.for_device(DeviceClass::Mobile),
            ScrollbarVisibility::Never
        );
        assert_eq!(
            config.visibility.for_device(DeviceClass::Desktop),
            ScrollbarVisibility::Auto
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ScrollAreaConfig::from_toml_str("shadow_threshold = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "shadow_threshold",
                ..
            }
        ));

        let err = ScrollAreaConfig::from_toml_str("auto_hide_delay_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "auto_hide_delay_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_document() {
        let err = ScrollAreaConfig::from_toml_str("thumb_anchor = \"middle\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ScrollAreaConfig::always_visible().with_thumb_anchor(ThumbAnchor::LeadingEdge);
        let text = config.to_toml().unwrap();
        assert_eq!(ScrollAreaConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = ScrollAreaConfig::load("/nonexistent/veneer.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

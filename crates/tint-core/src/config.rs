//! Engine configuration
//!
//! Settings can be serialized to and loaded from RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::{
    DEBUG_ALPHA, DEFAULT_COLOR, DEFAULT_DEBUG_COLOR, FINGERPRINT_PRECISION, LABEL_LENGTH,
};
use crate::error::{TintError, TintResult};
use crate::fingerprint::Fingerprinter;
use crate::palette::Palette;
use crate::report::InfoColumn;

/// Operation report configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Columns in display order
    pub columns: Vec<InfoColumn>,
    /// Tint each row with the operation color (ANSI truecolor)
    pub colored: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            columns: InfoColumn::DEFAULT.to_vec(),
            colored: true,
        }
    }
}

impl ReportConfig {
    /// Plain text report without escape codes
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TintConfig {
    /// Fingerprint quantization factor
    pub precision: f64,
    /// Colormap for operations without an explicit color (None = default color)
    pub palette: Option<Palette>,
    /// Color of faces without a resolved color
    pub default_color: Color,
    /// Color of debugged faces without an explicit color
    pub default_debug_color: Color,
    /// Alpha of non-debugged faces while debug overrides are active
    pub debug_alpha: f32,
    /// Number of fingerprint characters used for face labels
    pub label_length: usize,
    pub report: ReportConfig,
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            precision: FINGERPRINT_PRECISION,
            palette: Some(Palette::default()),
            default_color: Color::from(DEFAULT_COLOR),
            default_debug_color: Color::from(DEFAULT_DEBUG_COLOR),
            debug_alpha: DEBUG_ALPHA,
            label_length: LABEL_LENGTH,
            report: ReportConfig::default(),
        }
    }
}

impl TintConfig {
    /// Every unlabeled operation gets the default color
    pub fn monochrome() -> Self {
        Self {
            palette: None,
            ..Self::default()
        }
    }

    /// Fingerprinter at the configured precision
    pub fn fingerprinter(&self) -> Fingerprinter {
        Fingerprinter::new(self.precision)
    }

    /// Check value ranges
    pub fn validate(&self) -> TintResult<()> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(TintError::Config(format!(
                "precision must be positive, got {}",
                self.precision
            )));
        }
        if !(0.0..=1.0).contains(&self.debug_alpha) {
            return Err(TintError::Config(format!(
                "debug_alpha must be within 0..=1, got {}",
                self.debug_alpha
            )));
        }
        if self.label_length == 0 {
            return Err(TintError::Config("label_length must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse and validate a RON document
    pub fn from_ron_str(content: &str) -> TintResult<Self> {
        let config: TintConfig =
            ron::from_str(content).map_err(|e| TintError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> TintResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| TintError::Config(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> TintResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| TintError::Config(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> TintResult<()> {
        let content = self.to_ron_string()?;
        std::fs::write(path, content).map_err(|e| TintError::Config(e.to_string()))
    }
}

//! User configuration: the breakpoint table and the scale law parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Font size browsers apply to the root element when nothing overrides it.
pub const DEFAULT_DOCUMENT_FONT_SIZE: f64 = 16.0;

/// Minor third; a gentle scale that suits body copy.
pub const DEFAULT_RATIO: f64 = 1.2;

/// One configured breakpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointConfig {
    /// Identifier used in `@t-above(name)` and in the generated `--name` property.
    pub name: String,
    /// Minimum viewport width, e.g. `"768px"`. Exactly one breakpoint starts with `0`.
    pub value: String,
    /// Root font size in pixels at this breakpoint; defaults to the document font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<f64>,
}

impl BreakpointConfig {
    pub fn new(name: impl Into<String>, value: impl Into<String>, root: f64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            root: Some(root),
        }
    }
}

/// Complete configuration of a pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Pixel size that `100%` on the root element stands for.
    pub document_font_size: f64,
    /// Ratio between two adjacent steps of the modular scale.
    pub ratio: f64,
    pub breakpoints: Vec<BreakpointConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document_font_size: DEFAULT_DOCUMENT_FONT_SIZE,
            ratio: DEFAULT_RATIO,
            breakpoints: vec![
                BreakpointConfig::new("mobile", "0px", 16.0),
                BreakpointConfig::new("tablet", "768px", 18.0),
                BreakpointConfig::new("desktop", "1280px", 20.0),
            ],
        }
    }
}

impl Config {
    /// Configuration with default scale parameters and the given breakpoints.
    pub fn with_breakpoints(breakpoints: Vec<BreakpointConfig>) -> Self {
        Self {
            breakpoints,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration. Missing top-level keys fall back to defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::Json` when the text is not a valid configuration object.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` when the file cannot be read and `ConfigError::Json`
    /// when its contents do not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Root size of a breakpoint, falling back to the document font size.
    pub(crate) fn root_of(&self, breakpoint: &BreakpointConfig) -> f64 {
        breakpoint.root.unwrap_or(self.document_font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn json_keys_are_camel_case_and_optional() {
        let config = Config::from_json_str(
            r#"{
                "ratio": 1.25,
                "breakpoints": [
                    { "name": "mobile", "value": "0px" },
                    { "name": "tablet", "value": "768px", "root": 18 }
                ]
            }"#,
        )
        .unwrap();
        assert!((config.ratio - 1.25).abs() < f64::EPSILON);
        assert!((config.document_font_size - DEFAULT_DOCUMENT_FONT_SIZE).abs() < f64::EPSILON);
        assert_eq!(config.breakpoints[0].root, None);
        assert!((config.root_of(&config.breakpoints[0]) - 16.0).abs() < f64::EPSILON);
        assert_eq!(config.breakpoints[1].root, Some(18.0));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = Config::from_json_str("{ \"breakpoints\": 3 }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_reads_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "documentFontSize": 10, "breakpoints": [{{ "name": "base", "value": "0" }}] }}"#
        )
        .unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!((config.document_font_size - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.breakpoints.len(), 1);
    }

    #[test]
    fn load_reports_missing_files() {
        let err = Config::load(Path::new("/nonexistent/modscale.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/modscale.json"));
    }
}

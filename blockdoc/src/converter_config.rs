//! Converter configuration from blockdoc.toml

use crate::html_exporter::HtmlOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "blockdoc.toml";

/// Converter configuration from blockdoc.toml
///
/// Every key is optional; missing keys take the values of
/// [`ConverterConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// HTML-escape text interpolated into generated HTML
    pub escape_text: bool,

    /// Pretty-print block JSON output
    pub pretty_json: bool,

    /// File extensions treated as HTML input during batch conversion
    pub html_extensions: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            escape_text: false,
            pretty_json: true,
            html_extensions: vec!["html".to_string(), "htm".to_string()],
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a blockdoc.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ConverterConfig)` - Successfully loaded configuration
    /// * `Err(ConverterConfigError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConverterConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: ConverterConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a blockdoc.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConverterConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// HTML serialization options derived from this configuration
    pub fn html_options(&self) -> HtmlOptions {
        HtmlOptions {
            escape_text: self.escape_text,
        }
    }

    /// Whether a file extension marks HTML input (case-insensitive)
    pub fn is_html_extension(&self, extension: &str) -> bool {
        self.html_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Errors that can occur when loading or saving converter configuration
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConverterConfigError {
    /// IO error when reading or writing file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Error serializing to TOML
    #[error("TOML serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_config_roundtrip() {
        let config = ConverterConfig {
            escape_text: true,
            pretty_json: false,
            html_extensions: vec!["xhtml".to_string()],
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        println!("Generated TOML:\n{}", toml_str);

        let parsed: ConverterConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
escape_text = true
"#;

        let config: ConverterConfig = toml::from_str(toml_content).unwrap();

        assert!(config.escape_text);
        assert!(config.pretty_json);
        assert_eq!(config.html_extensions, vec!["html", "htm"]);
        assert!(config.html_options().escape_text);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: ConverterConfig = toml::from_str("").unwrap();
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(toml::from_str::<ConverterConfig>("escape_text = \"yes\"").is_err());
    }

    #[test]
    fn test_html_extension_match() {
        let config = ConverterConfig::default();
        assert!(config.is_html_extension("HTML"));
        assert!(config.is_html_extension("htm"));
        assert!(!config.is_html_extension("json"));
    }
}

//! Output formats for exported schemas.

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Text format the schema is written in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Block-style YAML.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension, if it names one.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Serialize `value` to text, keeping its key order.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialization`] if the value contains something
    /// the target format cannot represent.
    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<String, ExportError> {
        match self {
            Self::Yaml => serde_yaml::to_string(value)
                .map_err(|err| ExportError::serialization(self, err)),
            Self::Json => {
                let mut text = serde_json::to_string_pretty(value)
                    .map_err(|err| ExportError::serialization(self, err))?;
                text.push('\n');
                Ok(text)
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        })
    }
}

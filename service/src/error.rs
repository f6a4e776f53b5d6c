use crate::format::OutputFormat;
use crate::provider::ProviderError;
use std::error::Error as StdError;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while exporting a schema.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Schema provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to serialize schema as {format}: {source}")]
    Serialization {
        format: OutputFormat,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub(crate) fn serialization<E>(format: OutputFormat, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Serialization {
            format,
            source: Box::new(source),
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = ExportError::io(
            Path::new("missing/openapi.yaml"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        let message = err.to_string();
        assert!(message.contains("missing/openapi.yaml"), "{message}");
    }

    #[test]
    fn provider_error_converts() {
        let err: ExportError = ProviderError::new("app failed to start").into();
        assert!(matches!(err, ExportError::Provider(_)));
        assert_eq!(err.to_string(), "Schema provider failed: app failed to start");
    }
}

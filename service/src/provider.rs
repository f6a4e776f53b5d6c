//! Schema providers.
//!
//! A provider is whatever can hand the exporter a serializable schema on
//! demand. The service's [`ApiDoc`](crate::rest::ApiDoc) is one; tests inject
//! fakes through [`FnProvider`].

use serde::Serialize;
use std::error::Error as StdError;

/// Failure raised by a provider while producing its schema.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ProviderError {
    /// Create an error with a message and no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping the cause reported by the application.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Capability that produces a schema on demand.
///
/// The schema is an opaque nested mapping; the exporter only requires that it
/// serializes. Implementations must return mappings whose serialized key order
/// is the order they want written, since the exporter never reorders keys.
pub trait SchemaProvider {
    type Schema: Serialize;

    /// Produce the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the application cannot build its schema.
    fn schema(&self) -> Result<Self::Schema, ProviderError>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    type Schema = P::Schema;

    fn schema(&self) -> Result<Self::Schema, ProviderError> {
        (**self).schema()
    }
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Box<P> {
    type Schema = P::Schema;

    fn schema(&self) -> Result<Self::Schema, ProviderError> {
        (**self).schema()
    }
}

/// Adapts a closure into a [`SchemaProvider`].
#[derive(Clone, Copy, Debug)]
pub struct FnProvider<F>(F);

impl<F, T> FnProvider<F>
where
    F: Fn() -> Result<T, ProviderError>,
    T: Serialize,
{
    pub const fn new(produce: F) -> Self {
        Self(produce)
    }
}

impl<F, T> SchemaProvider for FnProvider<F>
where
    F: Fn() -> Result<T, ProviderError>,
    T: Serialize,
{
    type Schema = T;

    fn schema(&self) -> Result<T, ProviderError> {
        (self.0)()
    }
}

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod provider;
pub mod rest;

pub use error::ExportError;
pub use export::{export, CheckOutcome, SchemaExporter};
pub use format::OutputFormat;
pub use provider::{FnProvider, ProviderError, SchemaProvider};

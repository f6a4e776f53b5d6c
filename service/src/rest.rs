//! REST API handlers and `OpenAPI` documentation.
//!
//! [`ApiDoc`] is the schema provider the `export_openapi` binary writes out;
//! [`router`] serves the same handlers it documents.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use crate::provider::{ProviderError, SchemaProvider};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always `ok` while the service is accepting requests
    #[schema(example = "ok")]
    pub status: String,
}

/// Name and version of the running service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionInfo {
    /// Crate name
    pub name: String,
    /// Semantic version of the build
    #[schema(example = "0.1.0")]
    pub version: String,
}

impl VersionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Document Conversion API",
        version = "1.0.0",
        description = "REST API for the document conversion service",
        license(name = "MIT")
    ),
    paths(health, version_info),
    components(schemas(HealthStatus, VersionInfo)),
    tags(
        (name = "System", description = "Service liveness and build metadata")
    )
)]
pub struct ApiDoc;

impl SchemaProvider for ApiDoc {
    type Schema = utoipa::openapi::OpenApi;

    fn schema(&self) -> Result<Self::Schema, ProviderError> {
        Ok(Self::openapi())
    }
}

/// Routes documented by [`ApiDoc`].
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version_info))
}

/// Health check
///
/// Reports that the service is up.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// Get version information
///
/// Returns the service name and version it was built as.
#[utoipa::path(
    get,
    path = "/version",
    tag = "System",
    responses(
        (status = 200, description = "Version information retrieved successfully", body = VersionInfo)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn version_info() -> Json<VersionInfo> {
    Json(VersionInfo::current())
}

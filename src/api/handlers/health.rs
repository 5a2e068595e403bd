//! Health probe for releasebadge.
//!
//! There are no external dependencies to probe; the payload reports build
//! metadata and how many projects the catalog holds.

use crate::{GIT_COMMIT_HASH, projects::SharedMetadata, short_commit};
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    projects: usize,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Service is healthy", body = Health),
    ),
    tag = "health",
)]
/// Report build metadata and catalog size. `OPTIONS` returns headers only.
pub async fn health(method: Method, metadata: Extension<SharedMetadata>) -> impl IntoResponse {
    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        projects: metadata.len(),
    };

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    let mut headers = HeaderMap::new();
    let x_app = format!(
        "{}:{}:{}",
        health.name,
        health.version,
        short_commit(&health.commit)
    );
    match HeaderValue::from_str(&x_app) {
        Ok(value) => {
            headers.insert("X-App", value);
        }
        Err(err) => debug!("Failed to build X-App header from {x_app}: {err}"),
    }

    (StatusCode::OK, headers, body)
}

use crate::{
    badge::{self, Badge},
    projects::{SharedMetadata, valid_project_key},
};
use axum::{
    extract::{Extension, Path},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
    },
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument, warn};

#[utoipa::path(
    get,
    path = "/badge/{project}",
    params(("project" = String, Path, description = "Project id, optionally suffixed with `.svg`")),
    responses(
        (status = 200, description = "Badge for the project's current release", content_type = "image/svg+xml", body = String,
            headers(
                ("ETag" = String, description = "Quoted release version"),
                ("Cache-Control" = String, description = "max-age=3600")
            )
        ),
        (status = 304, description = "Badge unchanged since the supplied ETag"),
        (status = 404, description = "Unknown project, or project without releases"),
    ),
    tag = "badges"
)]
/// Render the release badge for a project.
#[instrument(skip(headers, metadata))]
pub async fn badge(
    Path(project): Path<String>,
    headers: HeaderMap,
    metadata: Extension<SharedMetadata>,
) -> Response {
    let key = project.strip_suffix(".svg").unwrap_or(&project);

    if !valid_project_key(key) {
        debug!("Rejected project key");
        return StatusCode::NOT_FOUND.into_response();
    }

    let Some(project) = metadata.project(key) else {
        debug!("Project not found: {key}");
        return StatusCode::NOT_FOUND.into_response();
    };

    let Some(release) = project.badge_release() else {
        debug!("Project {key} has no releases");
        return StatusCode::NOT_FOUND.into_response();
    };

    let badge = badge::render(&project.name, release);
    let cache_headers = cache_headers(&badge);

    if not_modified(&headers, &badge.etag) {
        debug!("Badge for {key} not modified");
        return (StatusCode::NOT_MODIFIED, cache_headers).into_response();
    }

    debug!("Badge for {key}: {}", release.version);

    (
        StatusCode::OK,
        [(CONTENT_TYPE, HeaderValue::from_static(badge::CONTENT_TYPE))],
        cache_headers,
        badge.svg,
    )
        .into_response()
}

fn cache_headers(badge: &Badge) -> HeaderMap {
    let mut headers = HeaderMap::new();

    match HeaderValue::from_str(&badge.etag) {
        Ok(etag) => {
            headers.insert(ETAG, etag);
        }
        Err(err) => warn!("Failed to build ETag header from {}: {err}", badge.etag),
    }

    if let Ok(cache_control) = HeaderValue::from_str(&format!("max-age={}", badge.max_age)) {
        headers.insert(CACHE_CONTROL, cache_control);
    }

    headers
}

/// `If-None-Match` uses weak comparison, so `W/` prefixes are ignored.
fn not_modified(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::{Project, Release, ReleaseStatus, catalog::Catalog};
    use anyhow::Result;
    use axum::body::to_bytes;
    use std::sync::Arc;

    fn metadata(releases: Vec<Release>) -> Result<Extension<SharedMetadata>> {
        let catalog = Catalog::from_projects(vec![Project::new(
            "spring-data-redis",
            "Spring Data Redis",
            releases,
        )])?;
        let metadata: SharedMetadata = Arc::new(catalog);
        Ok(Extension(metadata))
    }

    fn ga(version: &str, current: bool) -> Release {
        Release::new(version, ReleaseStatus::GeneralAvailability, current)
    }

    #[test]
    fn if_none_match_variants() {
        let etag = "\"1.0.RELEASE\"";
        let mut headers = HeaderMap::new();
        assert!(!not_modified(&headers, etag));

        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("\"0.9.RELEASE\""));
        assert!(!not_modified(&headers, etag));

        headers.insert(
            IF_NONE_MATCH,
            HeaderValue::from_static("\"0.9.RELEASE\", W/\"1.0.RELEASE\""),
        );
        assert!(not_modified(&headers, etag));

        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("*"));
        assert!(not_modified(&headers, etag));
    }

    #[tokio::test]
    async fn badge_sets_headers_and_body() -> Result<()> {
        let response = badge(
            Path("spring-data-redis".to_string()),
            HeaderMap::new(),
            metadata(vec![ga("1.0.RELEASE", true)])?,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static(badge::CONTENT_TYPE))
        );
        assert_eq!(
            response.headers().get(ETAG),
            Some(&HeaderValue::from_static("\"1.0.RELEASE\""))
        );
        assert_eq!(
            response.headers().get(CACHE_CONTROL),
            Some(&HeaderValue::from_static("max-age=3600"))
        );

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let body_text = String::from_utf8(body.to_vec())?;
        assert!(body_text.contains("<svg"));
        assert!(body_text.contains("Spring Data Redis"));
        assert!(body_text.contains("1.0.RELEASE"));
        Ok(())
    }

    #[tokio::test]
    async fn svg_suffix_is_accepted() -> Result<()> {
        let response = badge(
            Path("spring-data-redis.svg".to_string()),
            HeaderMap::new(),
            metadata(vec![ga("1.0.RELEASE", true)])?,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn empty_releases_is_not_found() -> Result<()> {
        let response = badge(
            Path("spring-data-redis".to_string()),
            HeaderMap::new(),
            metadata(vec![])?,
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn matching_etag_is_not_modified() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("\"1.0.RELEASE\""));

        let response = badge(
            Path("spring-data-redis".to_string()),
            headers,
            metadata(vec![ga("1.0.RELEASE", true)])?,
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(
            response.headers().get(ETAG),
            Some(&HeaderValue::from_static("\"1.0.RELEASE\""))
        );
        assert!(response.headers().get(CONTENT_TYPE).is_none());

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(body.is_empty());
        Ok(())
    }
}

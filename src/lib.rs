//! # Releasebadge (Project Version Badges)
//!
//! `releasebadge` serves small SVG badges that advertise a project's current
//! release, suitable for embedding in READMEs and documentation sites.
//!
//! ## Release Selection
//!
//! Each project carries an ordered list of releases. The badge shows:
//!
//! 1. The first release flagged **current**, if any.
//! 2. Otherwise the highest numeric version, when every label starts with one
//!    (`1.1.RELEASE` beats `1.0.RELEASE`).
//! 3. Otherwise the first release in list order. Release-train names
//!    (`Angel-SR6`, `Brixton-SR2`) are never compared.
//!
//! A project with no releases has no badge and answers `404 Not Found`.
//!
//! ## Caching
//!
//! Badges carry `ETag: "<version>"` and `Cache-Control: max-age=3600`. Requests
//! with a matching `If-None-Match` get `304 Not Modified`.
//!
//! ## Metadata
//!
//! Project metadata comes from a [`projects::ProjectMetadata`] source. The
//! shipped binary uses a read-only JSON [`projects::catalog::Catalog`] loaded at
//! startup.

pub mod api;
pub mod badge;
pub mod cli;
pub mod projects;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

/// First seven characters of a commit hash, or the whole (trimmed) value when shorter.
#[must_use]
pub fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}

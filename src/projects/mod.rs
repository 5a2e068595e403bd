//! Project metadata and release selection.
//!
//! A [`Project`] owns an ordered list of [`Release`]s. The order is whatever the
//! metadata source provides; nothing here re-sorts it. [`select_release`] picks
//! the release advertised on a project's badge.

pub mod catalog;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, sync::Arc};

static PROJECT_KEY: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").ok());

/// Whether `key` can be served as `/badge/{key}`.
///
/// Keys ending in `.svg` are rejected because the route strips that suffix.
#[must_use]
pub fn valid_project_key(key: &str) -> bool {
    !key.ends_with(".svg") && PROJECT_KEY.as_ref().is_some_and(|re| re.is_match(key))
}

/// Source of project metadata, keyed by project id (slug).
pub trait ProjectMetadata {
    /// Return the project for `key`, or `None` when it is unknown.
    fn project(&self, key: &str) -> Option<Arc<Project>>;

    /// Number of projects known to this source.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type SharedMetadata = Arc<dyn ProjectMetadata + Send + Sync>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseStatus {
    GeneralAvailability,
    Prerelease,
    Snapshot,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    pub status: ReleaseStatus,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub ref_doc_url: String,
    #[serde(default)]
    pub api_doc_url: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub artifact_id: String,
}

impl Release {
    #[must_use]
    pub fn new(version: impl Into<String>, status: ReleaseStatus, current: bool) -> Self {
        Self {
            version: version.into(),
            status,
            current,
            ref_doc_url: String::new(),
            api_doc_url: String::new(),
            group_id: String::new(),
            artifact_id: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub site_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub aggregator: bool,
    #[serde(default)]
    pub releases: Vec<Release>,
}

impl Project {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, releases: Vec<Release>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            repo_url: String::new(),
            site_url: String::new(),
            category: String::new(),
            aggregator: false,
            releases,
        }
    }

    /// The release shown on this project's badge.
    #[must_use]
    pub fn badge_release(&self) -> Option<&Release> {
        select_release(&self.releases)
    }
}

/// Pick the release to advertise.
///
/// The first release flagged `current` wins. Without one, the first release in
/// list order is used, unless every label starts with a numeric version, in
/// which case the highest version wins (the earlier entry on ties).
/// Release-train names such as `Angel-SR6` are never ordered against each other.
#[must_use]
pub fn select_release(releases: &[Release]) -> Option<&Release> {
    if let Some(current) = releases.iter().find(|release| release.current) {
        return Some(current);
    }

    let first = releases.first()?;

    let Some(versions) = releases
        .iter()
        .map(|release| numeric_version(&release.version))
        .collect::<Option<Vec<_>>>()
    else {
        return Some(first);
    };

    let mut best = 0;
    for (index, version) in versions.iter().enumerate().skip(1) {
        if compare_numeric(version, &versions[best]) == Ordering::Greater {
            best = index;
        }
    }

    releases.get(best)
}

/// Leading dot-separated numeric components of a version label.
///
/// `1.0.RELEASE` gives `[1, 0]`, `2.3.1-M1` gives `[2, 3, 1]`; a label that does
/// not start with a digit gives `None`.
fn numeric_version(label: &str) -> Option<Vec<u64>> {
    let mut parts = Vec::new();

    for segment in label.split('.') {
        let digits: &str = segment
            .find(|ch: char| !ch.is_ascii_digit())
            .map_or(segment, |end| &segment[..end]);

        if digits.is_empty() {
            break;
        }

        parts.push(digits.parse::<u64>().ok()?);

        // A qualifier glued to the number ends the numeric prefix.
        if digits.len() != segment.len() {
            break;
        }
    }

    if parts.is_empty() { None } else { Some(parts) }
}

// Missing trailing components count as zero, so 1.0 == 1.0.0.
fn compare_numeric(left: &[u64], right: &[u64]) -> Ordering {
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

//! Read-only, file-backed project catalog.
//!
//! The catalog is a JSON document (`{"projects": [...]}`) loaded once at
//! startup. Ids and version labels end up in URLs and `ETag` headers, so they
//! are checked here rather than at request time.

use super::{Project, ProjectMetadata, valid_project_key};
use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tracing::{debug, info};

#[derive(Deserialize, Debug)]
struct CatalogFile {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    projects: HashMap<String, Arc<Project>>,
}

impl Catalog {
    /// Load and validate a catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid catalog JSON,
    /// or contains an invalid or duplicated project.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog at {}", path.display()))?;

        let catalog = Self::from_json(&raw)
            .with_context(|| format!("Invalid catalog at {}", path.display()))?;

        info!(
            "Loaded {} project(s) from {}",
            catalog.projects.len(),
            path.display()
        );

        Ok(catalog)
    }

    /// Parse a catalog from its JSON text.
    ///
    /// # Errors
    /// Returns an error on malformed JSON or invalid projects.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw).context("Failed to parse catalog")?;
        Self::from_projects(file.projects)
    }

    /// Build a catalog from already constructed projects.
    ///
    /// # Errors
    /// Returns an error if a project id is duplicated or a project fails validation.
    pub fn from_projects(projects: Vec<Project>) -> Result<Self> {
        let mut map = HashMap::with_capacity(projects.len());

        for project in projects {
            validate(&project)?;

            if map.contains_key(&project.id) {
                bail!("duplicate project id: {}", project.id);
            }

            debug!(
                "catalog project {} with {} release(s)",
                project.id,
                project.releases.len()
            );
            map.insert(project.id.clone(), Arc::new(project));
        }

        Ok(Self { projects: map })
    }
}

impl ProjectMetadata for Catalog {
    fn project(&self, key: &str) -> Option<Arc<Project>> {
        self.projects.get(key).cloned()
    }

    fn len(&self) -> usize {
        self.projects.len()
    }
}

fn validate(project: &Project) -> Result<()> {
    ensure!(
        valid_project_key(&project.id),
        "invalid project id: {:?}",
        project.id
    );
    ensure!(
        !project.name.trim().is_empty(),
        "project {} has an empty name",
        project.id
    );

    for release in &project.releases {
        ensure!(
            is_header_safe(&release.version),
            "project {} has an invalid release version: {:?}",
            project.id,
            release.version
        );
    }

    Ok(())
}

// Visible ASCII without `"`, so the value can be quoted into an ETag.
fn is_header_safe(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_graphic() && b != b'"')
}

use anyhow::{Context, Result};
use releasebadge::projects::{ProjectMetadata, catalog::Catalog};
use std::path::Path;

fn demo_catalog() -> Result<Catalog> {
    Catalog::from_path(&Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/catalog.json"))
}

fn badge_version(catalog: &Catalog, key: &str) -> Result<Option<String>> {
    let project = catalog.project(key).context("project missing")?;
    Ok(project.badge_release().map(|release| release.version.clone()))
}

#[test]
fn demo_catalog_loads() -> Result<()> {
    let catalog = demo_catalog()?;
    assert_eq!(catalog.len(), 3);
    Ok(())
}

#[test]
fn demo_catalog_badge_versions() -> Result<()> {
    let catalog = demo_catalog()?;

    assert_eq!(
        badge_version(&catalog, "spring-data-redis")?.as_deref(),
        Some("1.6.4.RELEASE")
    );
    assert_eq!(
        badge_version(&catalog, "spring-cloud")?.as_deref(),
        Some("Angel-SR6")
    );
    assert_eq!(badge_version(&catalog, "spring-session")?, None);
    Ok(())
}

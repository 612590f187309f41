//! Rewrite front-matter categories across content collections

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fs;

use crate::config::{CollectionConfig, CollectionScope};
use crate::content::{update_file, ContentDocument, UpdateOutcome};
use crate::Site;

/// What a categorize run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorizeReport {
    /// Files rewritten
    pub updated: usize,
    /// Files that already had the category
    pub unchanged: usize,
    /// Files without a front-matter block
    pub no_front_matter: usize,
    /// Mapped files that don't exist
    pub missing: usize,
    /// Locale directories created
    pub created_dirs: usize,
}

impl CategorizeReport {
    fn record(&mut self, outcome: UpdateOutcome) {
        match outcome {
            UpdateOutcome::Updated => self.updated += 1,
            UpdateOutcome::Unchanged => self.unchanged += 1,
            UpdateOutcome::NoFrontMatter => self.no_front_matter += 1,
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} updated, {} unchanged, {} without front-matter, {} missing, {} directories created",
            self.updated, self.unchanged, self.no_front_matter, self.missing, self.created_dirs
        )
    }
}

/// Apply every category mapping, or only the named collection's
pub fn run(site: &Site, only: Option<&str>) -> Result<CategorizeReport> {
    let collections: Vec<&CollectionConfig> = match only {
        Some(name) => vec![site.config.collection(name).ok_or_else(|| {
            let available: Vec<_> = site
                .config
                .collections
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            anyhow!(
                "Unknown collection: {}. Available: {}",
                name,
                available.join(", ")
            )
        })?],
        None => site.config.collections.iter().collect(),
    };

    let mut report = CategorizeReport::default();

    for collection in collections {
        tracing::info!(
            "Processing {} ({} mapped files)",
            collection.name,
            collection.categories.len()
        );
        match collection.scope {
            CollectionScope::Primary => categorize_primary(site, collection, &mut report)?,
            CollectionScope::All => categorize_all(site, collection, &mut report)?,
        }
    }

    Ok(report)
}

/// Update the primary-locale document and make room for its translations
fn categorize_primary(
    site: &Site,
    collection: &CollectionConfig,
    report: &mut CategorizeReport,
) -> Result<()> {
    for rule in &collection.categories {
        let doc = ContentDocument::new(&collection.name, &site.config.primary_locale, &rule.file);
        let path = doc.path(&site.content_dir);

        if !path.exists() {
            tracing::debug!("Skipping missing {:?}", path);
            report.missing += 1;
            continue;
        }

        report.record(update_file(&path, &rule.category)?);

        // Translated variants are written by hand; only the directory is prepared
        for locale in site.config.secondary_locales() {
            let dir = doc.in_locale(locale).locale_dir(&site.content_dir);
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
                tracing::info!("Created {:?}", dir);
                report.created_dirs += 1;
            }
        }
    }

    Ok(())
}

/// Update every locale variant that exists
fn categorize_all(
    site: &Site,
    collection: &CollectionConfig,
    report: &mut CategorizeReport,
) -> Result<()> {
    for rule in &collection.categories {
        for locale in &site.config.locales {
            let path = ContentDocument::new(&collection.name, locale, &rule.file)
                .path(&site.content_dir);

            if !path.exists() {
                tracing::debug!("Skipping missing {:?}", path);
                report.missing += 1;
                continue;
            }

            report.record(update_file(&path, &rule.category)?);
        }
    }

    Ok(())
}

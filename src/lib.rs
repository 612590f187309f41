//! sitekit: maintenance tools for a bilingual portfolio and blog site
//!
//! Two independent utilities live here: a metadata updater that rewrites the
//! `category` line of Markdown front-matter across locale variants, and a
//! model invoker that asks an external model CLI for a frontend component.

pub mod commands;
pub mod config;
pub mod content;
pub mod model;

use anyhow::Result;
use std::path::Path;

/// The site being maintained
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content collections root
    pub content_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site from a directory, reading `sitekit.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let config = if config_path.exists() {
            tracing::debug!("Loading configuration from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);

        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Rewrite front-matter categories across all collections
    pub fn categorize(&self) -> Result<commands::categorize::CategorizeReport> {
        commands::categorize::run(self, None)
    }
}

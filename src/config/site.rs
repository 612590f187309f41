//! Site configuration (sitekit.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration file name, looked up in the base directory
pub const CONFIG_FILE: &str = "sitekit.yml";

const DEFAULT_PROMPT: &str = r#"You are a creative frontend engineer. I want to optimize a 'Galaxy' background component for a Vue 3 + Vite project.
The goal is to use Three.js or Canvas API to create a performant, beautiful starfield.
Requirement:
1. Use Vue 3 <script setup> syntax.
2. Optimize for GPU (requestAnimationFrame, BufferGeometry).
3. Ensure it's responsive.

Please provide the full code for {target}.
"#;

/// Main site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the content collections, relative to the base directory
    pub content_dir: String,
    /// Locale whose documents are authoritative
    pub primary_locale: String,
    /// All locales, in processing order
    pub locales: Vec<String>,
    /// Content collections and their category mappings
    pub collections: Vec<CollectionConfig>,
    /// External model invocation
    pub model: ModelConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "src/content".to_string(),
            primary_locale: "zh".to_string(),
            locales: vec!["zh".to_string(), "en".to_string()],
            collections: vec![
                CollectionConfig {
                    name: "portfolio".to_string(),
                    scope: CollectionScope::Primary,
                    categories: vec![
                        CategoryRule::new("tricys-series.md", "Engineering & Simulation"),
                        CategoryRule::new("infrastructure-series.md", "DevOps & Infrastructure"),
                        CategoryRule::new("wasker-series.md", "Web Development"),
                    ],
                },
                CollectionConfig {
                    name: "blog".to_string(),
                    scope: CollectionScope::All,
                    categories: vec![CategoryRule::new(
                        "2026-02-13-the-boss-instructions.md",
                        "Strategic Guidelines",
                    )],
                },
            ],
            model: ModelConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Find a collection by name
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Locales other than the primary one
    pub fn secondary_locales(&self) -> impl Iterator<Item = &str> {
        self.locales
            .iter()
            .map(String::as_str)
            .filter(move |l| *l != self.primary_locale)
    }
}

/// A content collection (`<content_dir>/<name>/<locale>/...`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    #[serde(default)]
    pub scope: CollectionScope,
    /// Filename -> category label, in order
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

/// Which locale variants of a collection get their metadata rewritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionScope {
    /// Only the primary locale; sibling locale directories are created
    Primary,
    /// Every locale variant that exists
    #[default]
    All,
}

/// One filename -> category assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub file: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new(file: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            category: category.into(),
        }
    }
}

/// External model CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Program to spawn
    pub command: String,
    /// Arguments placed before the model name
    pub args: Vec<String>,
    /// Model name, passed as the last argument
    pub name: String,
    /// File the generated component is written to
    pub target: String,
    /// Substring the output must contain to be accepted
    pub marker: String,
    /// Prompt template; `{target}` is replaced with the target path
    pub prompt: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            command: "gh".to_string(),
            args: vec!["models".to_string(), "run".to_string()],
            name: "gpt-4o".to_string(),
            target: "src/components/Galaxy.vue".to_string(),
            marker: "<template>".to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl ModelConfig {
    /// Render the prompt for a target path
    pub fn render_prompt(&self, target: &str) -> String {
        self.prompt.replace("{target}", target)
    }
}

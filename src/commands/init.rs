//! Initialize a site configuration

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::{SiteConfig, CONFIG_FILE};

/// Write the default `sitekit.yml` and create the collection directories
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Configuration already exists: {:?}", config_path);
    }

    fs::create_dir_all(target_dir)?;

    let config = SiteConfig::default();
    let content = format!(
        "# sitekit configuration\n# Collections map filenames to the category written into their front-matter.\n\n{}",
        serde_yaml::to_string(&config)?
    );
    fs::write(&config_path, content)?;

    let content_dir = target_dir.join(&config.content_dir);
    for collection in &config.collections {
        for locale in &config.locales {
            fs::create_dir_all(content_dir.join(&collection.name).join(locale))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_round_trips() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config, SiteConfig::default());
        assert!(dir.path().join("src/content/portfolio/zh").is_dir());
        assert!(dir.path().join("src/content/blog/en").is_dir());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "content_dir: mine\n").unwrap();

        assert!(init_site(dir.path()).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap(),
            "content_dir: mine\n"
        );
    }
}

//! List content documents and their categories

use anyhow::Result;
use serde::Serialize;
use std::fs;
use walkdir::WalkDir;

use crate::content::{ContentDocument, FrontMatter};
use crate::Site;

/// A document with its current category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(flatten)]
    pub document: ContentDocument,
    pub category: Option<String>,
}

/// Collect every `<collection>/<locale>/*.md` document, sorted by path
pub fn entries(site: &Site, collection: Option<&str>) -> Result<Vec<Entry>> {
    if !site.content_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(&site.content_dir)
        .min_depth(3)
        .max_depth(3)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(document) = ContentDocument::from_path(&site.content_dir, path) else {
            continue;
        };
        if collection.is_some_and(|name| name != document.collection) {
            continue;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                continue;
            }
        };
        let category = FrontMatter::extract(&content).and_then(|fm| fm.get("category"));

        entries.push(Entry { document, category });
    }

    entries.sort_by(|a, b| {
        (&a.document.collection, &a.document.locale, &a.document.file).cmp(&(
            &b.document.collection,
            &b.document.locale,
            &b.document.file,
        ))
    });

    Ok(entries)
}

/// Print documents as text or JSON
pub fn run(site: &Site, collection: Option<&str>, json: bool) -> Result<()> {
    let entries = entries(site, collection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Documents ({}):", entries.len());
    for entry in entries {
        println!(
            "  {}/{}/{} - {}",
            entry.document.collection,
            entry.document.locale,
            entry.document.file,
            entry.category.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_entries() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("src/content");
        fs::create_dir_all(content.join("blog/zh")).unwrap();
        fs::create_dir_all(content.join("portfolio/en")).unwrap();
        fs::write(
            content.join("blog/zh/b.md"),
            "---\ncategory: \"Strategic Guidelines\"\n---\n",
        )
        .unwrap();
        fs::write(content.join("blog/zh/a.md"), "no front-matter").unwrap();
        fs::write(content.join("blog/zh/notes.txt"), "---\ncategory: x\n---\n").unwrap();
        fs::write(content.join("portfolio/en/p.md"), "---\ntitle: P\n---\n").unwrap();
        fs::write(content.join("README.md"), "---\ncategory: x\n---\n").unwrap();

        let site = Site::with_config(dir.path(), SiteConfig::default());

        let all = entries(&site, None).unwrap();
        assert_eq!(
            all,
            vec![
                Entry {
                    document: ContentDocument::new("blog", "zh", "a.md"),
                    category: None,
                },
                Entry {
                    document: ContentDocument::new("blog", "zh", "b.md"),
                    category: Some("Strategic Guidelines".to_string()),
                },
                Entry {
                    document: ContentDocument::new("portfolio", "en", "p.md"),
                    category: None,
                },
            ]
        );

        let portfolio = entries(&site, Some("portfolio")).unwrap();
        assert_eq!(portfolio.len(), 1);

        let json = serde_json::to_value(&all[1]).unwrap();
        assert_eq!(json["collection"], "blog");
        assert_eq!(json["file"], "b.md");
        assert_eq!(json["category"], "Strategic Guidelines");
    }

    #[test]
    fn test_missing_content_dir() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        assert!(entries(&site, None).unwrap().is_empty());
    }
}

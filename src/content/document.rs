//! Locale-qualified content documents

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A document addressed as `<collection>/<locale>/<file>` under the content directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDocument {
    pub collection: String,
    pub locale: String,
    pub file: String,
}

impl ContentDocument {
    pub fn new(collection: &str, locale: &str, file: &str) -> Self {
        Self {
            collection: collection.to_string(),
            locale: locale.to_string(),
            file: file.to_string(),
        }
    }

    /// Directory holding this document's locale variant
    pub fn locale_dir(&self, content_dir: &Path) -> PathBuf {
        content_dir.join(&self.collection).join(&self.locale)
    }

    /// Full path of the document
    pub fn path(&self, content_dir: &Path) -> PathBuf {
        self.locale_dir(content_dir).join(&self.file)
    }

    /// The same document in another locale
    pub fn in_locale(&self, locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            ..self.clone()
        }
    }

    /// Recover a document from a path under the content directory.
    ///
    /// Only `<collection>/<locale>/<file>` (exactly three components) is accepted.
    pub fn from_path(content_dir: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(content_dir).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;

        match parts.as_slice() {
            [collection, locale, file] => Some(Self::new(collection, locale, file)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let doc = ContentDocument::new("portfolio", "zh", "tricys-series.md");
        let root = Path::new("src/content");
        assert_eq!(
            doc.path(root),
            PathBuf::from("src/content/portfolio/zh/tricys-series.md")
        );
        assert_eq!(
            doc.in_locale("en").locale_dir(root),
            PathBuf::from("src/content/portfolio/en")
        );
    }

    #[test]
    fn test_from_path() {
        let root = Path::new("/site/src/content");
        let doc =
            ContentDocument::from_path(root, Path::new("/site/src/content/blog/en/a.md")).unwrap();
        assert_eq!(doc, ContentDocument::new("blog", "en", "a.md"));

        assert!(ContentDocument::from_path(root, Path::new("/site/src/content/blog/a.md")).is_none());
        assert!(
            ContentDocument::from_path(root, Path::new("/site/src/content/blog/en/x/a.md"))
                .is_none()
        );
        assert!(ContentDocument::from_path(root, Path::new("/elsewhere/blog/en/a.md")).is_none());
    }
}

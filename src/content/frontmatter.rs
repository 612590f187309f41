//! Front-matter detection and in-place `category` rewriting
//!
//! Front-matter is only located, never parsed as YAML: the block between the
//! two `---` lines is treated as opaque text and edited line by line.

use anyhow::Result;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;

lazy_static! {
    /// `---` line at the very start, then everything up to the next `---` line
    static ref FRONT_MATTER_RE: Regex = Regex::new(r"(?msR)\A(---\r?\n)(.*?)^(---)$").unwrap();
    static ref CATEGORY_LINE_RE: Regex = Regex::new(r"(?mR)^category:.*$").unwrap();
}

/// Borrowed view over a document split at its front-matter delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Opening delimiter line, including its line ending
    pub opening: &'a str,
    /// Text between the delimiters
    pub block: &'a str,
    /// Closing delimiter, without its line ending
    pub closing: &'a str,
    /// Everything after the closing delimiter
    pub body: &'a str,
}

impl<'a> FrontMatter<'a> {
    /// Locate the leading front-matter block, if any
    pub fn extract(content: &'a str) -> Option<Self> {
        let caps = FRONT_MATTER_RE.captures(content)?;
        let opening = caps.get(1)?;
        let block = caps.get(2)?;
        let closing = caps.get(3)?;

        Some(Self {
            opening: opening.as_str(),
            block: block.as_str(),
            closing: closing.as_str(),
            body: &content[closing.end()..],
        })
    }

    /// Whether the block has a line starting with `category:`
    pub fn has_category(&self) -> bool {
        CATEGORY_LINE_RE.is_match(self.block)
    }

    /// Line ending used by this block
    fn line_ending(&self) -> &'static str {
        if self.opening.ends_with("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Top-level `key: value` pairs in order of appearance.
    ///
    /// Values are raw text with one layer of surrounding quotes removed.
    /// Nested structures, list items and comments are skipped.
    pub fn fields(&self) -> IndexMap<String, String> {
        let mut fields = IndexMap::new();

        for line in self.block.lines() {
            if line.is_empty() || line.starts_with([' ', '\t', '#', '-']) {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let is_key = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !is_key {
                continue;
            }
            fields.insert(key.to_string(), unquote(value.trim()));
        }

        fields
    }

    /// Value of a top-level key
    pub fn get(&self, key: &str) -> Option<String> {
        self.fields().shift_remove(key)
    }
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            let inner = &value[1..value.len() - 1];
            return if quote == '"' {
                inner.replace("\\\"", "\"").replace("\\\\", "\\")
            } else {
                inner.replace("''", "'")
            };
        }
    }
    value.to_string()
}

fn category_line(category: &str) -> String {
    let escaped = category.replace('\\', "\\\\").replace('"', "\\\"");
    format!("category: \"{}\"", escaped)
}

/// Set the `category` of a document's front-matter.
///
/// Existing `category:` lines are replaced; otherwise a new line is appended
/// to the block. Returns `None` when the document has no front-matter.
pub fn with_category(content: &str, category: &str) -> Option<String> {
    let fm = FrontMatter::extract(content)?;
    let line = category_line(category);

    let block = if fm.has_category() {
        CATEGORY_LINE_RE
            .replace_all(fm.block, NoExpand(&line))
            .into_owned()
    } else {
        format!("{}{}{}", fm.block, line, fm.line_ending())
    };

    Some(format!("{}{}{}{}", fm.opening, block, fm.closing, fm.body))
}

/// Result of rewriting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The file was rewritten
    Updated,
    /// The category was already set; nothing written
    Unchanged,
    /// No front-matter block; file left untouched
    NoFrontMatter,
}

/// Rewrite the `category` of a Markdown file in place
pub fn update_file<P: AsRef<Path>>(path: P, category: &str) -> Result<UpdateOutcome> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let Some(updated) = with_category(&content, category) else {
        tracing::debug!("No front-matter in {:?}, skipping", path);
        return Ok(UpdateOutcome::NoFrontMatter);
    };

    if updated == content {
        tracing::debug!("Category already {:?} in {:?}", category, path);
        return Ok(UpdateOutcome::Unchanged);
    }

    fs::write(path, updated)?;
    tracing::debug!("Set category {:?} in {:?}", category, path);

    Ok(UpdateOutcome::Updated)
}

//! Content module - locale-qualified documents and their front-matter

mod document;
mod frontmatter;

pub use document::ContentDocument;
pub use frontmatter::{update_file, with_category, FrontMatter, UpdateOutcome};

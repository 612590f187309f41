//! Configuration module

mod site;

pub use site::CategoryRule;
pub use site::CollectionConfig;
pub use site::CollectionScope;
pub use site::ModelConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILE;

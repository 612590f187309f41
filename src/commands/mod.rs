//! CLI commands

pub mod categorize;
pub mod generate;
pub mod init;
pub mod list;

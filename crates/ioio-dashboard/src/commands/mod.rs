//! Subcommand implementations. Each returns the process exit code.

pub mod delete;
pub mod show;
pub mod view;

//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `check` - Database connectivity

pub mod args;

pub use args::{Cli, Commands};

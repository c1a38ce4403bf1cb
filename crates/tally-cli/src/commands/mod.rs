//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analytics` - One command per engine operation
//! - `core` - Shared utilities (config, file loading, JSON output)
//! - `reports` - Combined report
//! - `serve` - Web server command

pub mod analytics;
pub mod core;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use analytics::*;
pub use core::*;
pub use reports::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

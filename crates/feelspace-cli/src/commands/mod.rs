//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Database setup (init) and shared utilities (open_db)
//! - `emotions` - Logging and listing emotions
//! - `analytics` - Analytics report rendering
//! - `games` - Game sessions, reward confirmation, wallet summary
//! - `import` - CSV import/export of emotion logs
//! - `serve` - Web server command

pub mod analytics;
pub mod core;
pub mod emotions;
pub mod games;
pub mod import;
pub mod serve;

// Re-export command functions for main.rs
pub use analytics::*;
pub use core::*;
pub use emotions::*;
pub use games::*;
pub use import::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, explain) and shared utilities (open_db)
//! - `import` - CSV import command
//! - `subscriptions` - Detection output command
//! - `transactions` - Transaction listing command
//! - `visibility` - Hide/unhide/hidden commands

pub mod core;
pub mod import;
pub mod subscriptions;
pub mod transactions;
pub mod visibility;

// Re-export command functions for main.rs
pub use core::*;
pub use import::*;
pub use subscriptions::*;
pub use transactions::*;
pub use visibility::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

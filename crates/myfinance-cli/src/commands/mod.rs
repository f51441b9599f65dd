//! CLI command implementations
//!
//! Organized by domain:
//! - `core`: Shared input loading, period defaults and table printing
//! - `health`: Health score command
//! - `reports`: Monthly/yearly/category reports and spending patterns
//! - `export`: CSV and PDF export commands
//! - `fetch`: Remote backend reports
//! - `serve`: API server

pub mod core;
pub mod export;
pub mod fetch;
pub mod health;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use fetch::*;
pub use health::*;
pub use reports::*;
pub use serve::*;

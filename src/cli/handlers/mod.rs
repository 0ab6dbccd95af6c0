//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - init: PostgreSQL schema creation
//! - data: Worksheet import
//! - clean: Cleaning pass
//! - insights: Insight extraction and delivery
//! - notify: Ad-hoc notifications
//! - report: Sentiment summaries and alerts
//! - info: Information display (config)

pub mod clean;
pub mod data;
pub mod info;
pub mod init;
pub mod insights;
pub mod notify;
pub mod report;

// Re-export all public handlers
pub use clean::*;
pub use data::*;
pub use info::*;
pub use init::*;
pub use insights::*;
pub use notify::*;
pub use report::*;

//! Weekly activity digest for the collective ledger.
//!
//! Aggregates a week of donation, expense, and collective activity from the
//! ledger database, renders a fixed text summary, and delivers it to a chat
//! webhook. Also exposes the test-support toolkit consumed by the external
//! test suite.

pub mod config;
pub mod core;
pub mod modules;
pub mod testkit;

// Re-export commonly used types
pub use modules::notify;
pub use modules::reports;

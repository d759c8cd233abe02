#![forbid(unsafe_code)]

//! Core domain model and business logic for the bufflog fitness tracker.
//!
//! This crate provides:
//! - Domain types (daily records, goal versions, aggregates, reports)
//! - The goal-versioned aggregation engine (resolver, bucketizer,
//!   aggregator, sleep balance, lifetime summary)
//! - Persistence (append-only JSONL stores for check-ins and goals)
//! - Configuration, logging, and CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod parse;
pub mod week;
pub mod aggregate;
pub mod balance;
pub mod summary;
pub mod engine;
pub mod csv_export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::GoalCatalog;
pub use config::Config;
pub use store::{CheckinStore, GoalStore};
pub use parse::parse_weight_sets;
pub use week::{bucketize, bucketize_filled, week_start_for};
pub use aggregate::aggregate;
pub use balance::compute_running_balance;
pub use summary::summarize;
pub use engine::{build_report, build_report_filled};
pub use csv_export::write_weekly_csv;

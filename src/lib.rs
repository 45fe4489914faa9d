//! `detsort` — Sort detection lists in JSON files by timestamp.
//!
//! This library provides the core of the `detsort` CLI tool. It classifies a
//! parsed JSON document (top-level array, or object holding a `detections`
//! array), stably sorts the records by their `timestamp` field using a
//! three-tier key (parsed instant, raw string, missing), and reports
//! before/after statistics. Everything outside the sorted list is left as is.
//!
//! # Example
//!
//! ```
//! use detsort::sort_records;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"timestamp": "2024-01-02T00:00:00Z"}),
//!     json!({"timestamp": "2024-01-01T00:00:00Z"}),
//! ];
//! let (sorted, stats) = sort_records(records, "detections", "timestamp");
//! assert!(stats.changed);
//! assert_eq!(stats.out_of_order, 1);
//! assert_eq!(sorted[0]["timestamp"], "2024-01-01T00:00:00Z");
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod process;
pub mod report;
pub mod sort_key;
pub mod sorter;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use config::Config;
pub use document::{Dispatch, DispatchOptions, Shape, dispatch};
pub use error::DetsortError;
pub use process::{FileOutcome, process_file, write_document};
pub use sort_key::SortKey;
pub use sorter::{SortPlan, SortStats, plan_sort, sort_records};
pub use timestamp::parse_instant;

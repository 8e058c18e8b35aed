//! # logfold-engine
//!
//! Aggregation core behind the `logfold` live table: folds a stream of
//! structured log records into groups of near-duplicates and tracks each
//! group's short-term arrival rate.
//!
//! ## Pipeline
//!
//! ```text
//! record ──> canonical string (key-field values in frozen key order)
//!               │
//!               ▼
//!         best_match (Levenshtein <= distance) ──> existing group or new group
//!               │
//!               ▼
//!         Group { latest record, cumulative count, TrendWindow }
//!               ▲
//!               │
//!         shift timer (one bucket per trend / TREND_BUCKETS)
//! ```
//!
//! All groups live behind one store-wide reader-writer lock: ingestion and
//! the shift timer write, renderers and detail views read.
//!
//! ## Example
//!
//! ```
//! use logfold_engine::{Config, Store};
//!
//! let store = Store::new(Config::default())?;
//! let record = serde_json::json!({"level": "ERROR", "message": "read timeout"})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//!
//! store.write().push(record);
//! assert_eq!(store.read().len(), 1);
//! # Ok::<(), logfold_engine::EngineError>(())
//! ```

mod config;
mod error;
mod keys;
mod matcher;
mod record;
mod store;
mod trend;

pub use config::Config;
pub use error::{EngineError, Result};
pub use matcher::levenshtein;
pub use record::{canonical, field_text, Record};
pub use store::{Group, GroupSnapshot, State, Store};
pub use trend::{TrendWindow, TREND_BUCKETS};

#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Baseline stores: where motion types and their reference / zero-score
//! recordings live.
//!
//! - `MemoryStore`: process-local, thread-safe.
//! - `JsonFileStore`: the same, persisted to a single JSON document.

pub mod error;
pub mod file;
pub mod memory;
pub mod schema;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::{MemoryStore, MotionEntry, MotionSummary, StoredRecording};

//! PetCare Persistence - storage layer
//!
//! Backends:
//! - JSON file storage (default, one pretty-printed array)
//! - In-memory storage (tests and dry runs)
//!
//! Principles:
//! - Atomic writes (temp file + rename)
//! - Tolerant reads: one bad entry never loses the rest

pub mod json;
pub mod store;

pub use json::JsonStore;
pub use store::{MemoryStore, PetStore, Result, SharedStore, Snapshot, StorageError};

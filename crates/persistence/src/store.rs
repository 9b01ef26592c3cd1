//! Storage abstraction
//!
//! The whole pet list is read and written as one unit; there is no
//! per-record access.

use petcare_core::Pet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Data file {path} is unreadable: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Lock failed: {0}")]
    LockFailed(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Result of a load: the pets that decoded, and how many entries did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub pets: Vec<Pet>,
    pub skipped: usize,
}

/// Storage trait for the pet list
#[async_trait::async_trait]
pub trait PetStore: Send + Sync {
    /// Load every pet
    async fn load(&self) -> Result<Snapshot>;

    /// Replace the stored list with `pets` (atomic where the backend allows)
    async fn save(&self, pets: &[Pet]) -> Result<()>;

    /// Human-readable location, for status lines and logs
    fn location(&self) -> String;
}

/// Shared store reference
pub type SharedStore = Arc<dyn PetStore>;

/// In-memory storage implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    pets: Mutex<Vec<Pet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pets(pets: Vec<Pet>) -> Self {
        Self {
            pets: Mutex::new(pets),
        }
    }
}

#[async_trait::async_trait]
impl PetStore for MemoryStore {
    async fn load(&self) -> Result<Snapshot> {
        let pets = self
            .pets
            .lock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        Ok(Snapshot {
            pets: pets.clone(),
            skipped: 0,
        })
    }

    async fn save(&self, pets: &[Pet]) -> Result<()> {
        let mut stored = self
            .pets
            .lock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        *stored = pets.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

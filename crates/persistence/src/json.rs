//! JSON file storage
//!
//! The whole pet list lives in a single pretty-printed JSON array.
//! Entries that fail to decode are skipped on load and written back
//! untouched on the next save.

use crate::store::{PetStore, Result, Snapshot, StorageError};
use petcare_core::Pet;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// JSON storage implementation
#[derive(Debug, Clone)]
pub struct JsonStore {
    /// Data file path
    path: PathBuf,
    /// Raw entries from the last load that did not decode
    unreadable: Arc<Mutex<Vec<Value>>>,
}

impl JsonStore {
    /// Open a JSON store, creating the parent directory if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            path,
            unreadable: Arc::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the data file with `.tmp` appended to the full name.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn set_unreadable(&self, entries: Vec<Value>) -> Result<()> {
        let mut unreadable = self
            .unreadable
            .lock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        *unreadable = entries;
        Ok(())
    }

    /// Decode one array entry; malformed entries are reported, not fatal.
    fn decode_entry(index: usize, entry: Value) -> std::result::Result<Pet, Value> {
        serde_json::from_value::<Pet>(entry.clone()).map_err(|e| {
            warn!("Skipping pet entry #{}: {}", index + 1, e);
            entry
        })
    }
}

#[async_trait::async_trait]
impl PetStore for JsonStore {
    async fn load(&self) -> Result<Snapshot> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file yet");
                self.set_unreadable(Vec::new())?;
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            self.set_unreadable(Vec::new())?;
            return Ok(Snapshot::default());
        }

        let entries: Vec<Value> =
            serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let mut pets = Vec::with_capacity(entries.len());
        let mut unreadable = Vec::new();
        for (i, entry) in entries.into_iter().enumerate() {
            match Self::decode_entry(i, entry) {
                Ok(pet) => pets.push(pet),
                Err(raw) => unreadable.push(raw),
            }
        }
        let skipped = unreadable.len();
        self.set_unreadable(unreadable)?;

        info!(path = %self.path.display(), pets = pets.len(), skipped, "Loaded pets");
        Ok(Snapshot { pets, skipped })
    }

    async fn save(&self, pets: &[Pet]) -> Result<()> {
        let mut entries = pets
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<Value>>>()?;
        let kept = {
            let unreadable = self
                .unreadable
                .lock()
                .map_err(|e| StorageError::LockFailed(e.to_string()))?;
            entries.extend(unreadable.iter().cloned());
            unreadable.len()
        };
        let content = serde_json::to_string_pretty(&entries)?;

        // Write a temp file first, then rename over the target (atomic)
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, content.as_bytes()).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), pets = pets.len(), kept, "Saved pets");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use petcare_core::{DogSize, HealthRecordKind, PetKind, Species};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_parent_and_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("pets_data.json");
        let store = JsonStore::open(&path).await.unwrap();
        assert!(dir.path().join("data").is_dir());
        assert_eq!(store.load().await.unwrap(), Snapshot::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("pets.json")).await.unwrap();

        let mut dog = Pet::new(
            "Rex",
            3,
            "Beagle",
            PetKind::Dog {
                size: DogSize::Large,
            },
            day(2024, 1, 1),
        )
        .unwrap();
        dog.add_health_record(HealthRecordKind::Vaccination, "Rabies", day(2024, 1, 2))
            .unwrap();
        let cat = Pet::new("Tom", 2, "", Species::Cat.default_kind(), day(2024, 1, 1)).unwrap();

        store.save(&[dog.clone(), cat.clone()]).await.unwrap();
        assert!(!store.temp_path().exists());

        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.skipped, 0);
        assert_eq!(snapshot.pets, vec![dog, cat]);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n  {"));
    }

    #[tokio::test]
    async fn test_load_file_from_older_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets_data.json");
        std::fs::write(
            &path,
            r#"[
  {
    "type": "Dog",
    "name": "Buddy",
    "age": 4,
    "breed": "Mixed",
    "care_schedule": [
      {"task": "Walk", "frequency_days": 1, "last_done": "2024-02-01"}
    ],
    "health_records": [
      {"type": "Checkup", "description": "All good", "date": "2024-01-15"}
    ],
    "size": "Small"
  },
  {
    "type": "Bird",
    "name": "Kiwi",
    "age": 1,
    "breed": "Budgie",
    "can_fly": false
  }
]"#,
        )
        .unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.skipped, 0);
        assert_eq!(snapshot.pets.len(), 2);

        let buddy = &snapshot.pets[0];
        assert_eq!(buddy.kind, PetKind::Dog { size: DogSize::Small });
        assert_eq!(buddy.care_schedule[0].last_done, day(2024, 2, 1));
        assert_eq!(buddy.health_records[0].kind, HealthRecordKind::Checkup);

        let kiwi = &snapshot.pets[1];
        assert_eq!(kiwi.kind, PetKind::Bird { can_fly: false });
        assert!(kiwi.care_schedule.is_empty());
        assert_ne!(buddy.id, kiwi.id);
    }

    #[tokio::test]
    async fn test_bad_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.json");
        std::fs::write(
            &path,
            r#"[
  {"type": "Hamster", "name": "Nibbles", "age": 1, "breed": "Dwarf"},
  {"type": "Cat", "name": "Mia", "age": 2, "breed": "Mixed"},
  {"type": "Dog", "name": "Bad date", "age": 2, "breed": "Mixed",
   "care_schedule": [{"task": "Walk", "frequency_days": 1, "last_done": "yesterday"}]},
  {"type": "Cat", "age": 2, "breed": "Mixed"}
]"#,
        )
        .unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.skipped, 3);
        assert_eq!(snapshot.pets.len(), 1);
        assert_eq!(snapshot.pets[0].name, "Mia");
    }

    #[tokio::test]
    async fn test_hand_edited_entries_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets_data.json");
        std::fs::write(
            &path,
            r#"[
  {"type": "Dog", "name": "Max", "age": 5, "breed": "Mastiff", "size": "Extra Large"},
  {"type": "Dog", "name": "Bo", "age": 2, "breed": "Mixed", "size": "medium"},
  {"type": "Bird", "name": "Zed", "age": -2, "breed": "Finch",
   "care_schedule": [{"task": "Feed", "frequency_days": -1, "last_done": "2024-02-01"}]},
  {"type": "Fish", "name": "Nemo", "age": 1, "breed": "Clown", "fins": 4},
  {"type": "Cat", "name": "Mia", "age": 2, "breed": "Mixed"}
]"#,
        )
        .unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.skipped, 1);
        let names: Vec<_> = snapshot.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Max", "Bo", "Zed", "Mia"]);

        // drop Mia, keep the rest
        store.save(&snapshot.pets[..3]).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.skipped, 1);
        let pets = &reloaded.pets;
        assert_eq!(
            pets[0].kind,
            PetKind::Dog {
                size: DogSize::Custom("Extra Large".to_string())
            }
        );
        assert_eq!(pets[1].kind, PetKind::Dog { size: DogSize::Medium });
        assert_eq!(pets[2].age, -2);
        assert_eq!(pets[2].care_schedule[0].frequency_days, -1);

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw[0]["size"], "Extra Large");
        assert_eq!(
            raw[3],
            serde_json::json!({"type": "Fish", "name": "Nemo", "age": 1, "breed": "Clown", "fins": 4})
        );
    }

    #[tokio::test]
    async fn test_temp_file_keeps_full_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("pets.tmp")).await.unwrap();
        assert_eq!(store.temp_path(), dir.path().join("pets.tmp.tmp"));

        let json = JsonStore::open(dir.path().join("pets.json")).await.unwrap();
        assert_eq!(json.temp_path(), dir.path().join("pets.json.tmp"));

        let cat = Pet::new("Tom", 2, "", Species::Cat.default_kind(), day(2024, 1, 1)).unwrap();
        store.save(std::slice::from_ref(&cat)).await.unwrap();
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().await.unwrap().pets, vec![cat]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.json");
        std::fs::write(&path, "{\"not\": \"a list\"}").unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
        // untouched on disk
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"not\": \"a list\"}");
    }

    #[tokio::test]
    async fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.json");
        std::fs::write(&path, "\n").unwrap();
        let store = JsonStore::open(&path).await.unwrap();
        assert!(store.load().await.unwrap().pets.is_empty());
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use crate::metadata::ClassKind;
use super::error::StorageError;
use super::record::Record;

/// In-memory registry of records keyed by `<ClassName>.<id>`, backed by a
/// single JSON file.
pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Record>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn all(&self) -> &BTreeMap<String, Record> {
        &self.objects
    }

    /// Registers a record under its store key, replacing any previous entry.
    pub fn new_record(&mut self, record: Record) {
        self.objects.insert(record.key(), record);
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.objects.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Record> {
        self.objects.remove(key)
    }

    pub fn of_class(&self, class: ClassKind) -> impl Iterator<Item = &Record> {
        self.objects.values().filter(move |record| record.class == class)
    }

    pub fn count(&self, class: ClassKind) -> usize {
        self.of_class(class).count()
    }

    /// Writes every record to the backing file.
    pub fn save(&self) -> Result<(), StorageError> {
        let document: Map<String, Value> = self.objects.iter()
            .map(|(key, record)| (key.clone(), Value::Object(record.to_dict())))
            .collect();

        let content = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        debug!(path = %self.path.display(), records = self.objects.len(), "saved store");
        Ok(())
    }

    /// Replaces the in-memory state with the contents of the backing file.
    /// A missing file leaves the store empty.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store file, starting empty");
                self.objects.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        let document: Map<String, Value> = serde_json::from_str(&content)?;

        let mut objects = BTreeMap::new();
        for (key, value) in document {
            let decoded = value.as_object()
                .ok_or_else(|| StorageError::InvalidRecord("entry is not an object".to_string()))
                .and_then(Record::from_dict);

            match decoded {
                Ok(record) => {
                    objects.insert(record.key(), record);
                }
                Err(e) => warn!(key = %key, error = %e, "skipping stored entry"),
            }
        }

        debug!(path = %self.path.display(), records = objects.len(), "reloaded store");
        self.objects = objects;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> FileStorage {
        FileStorage::new(dir.path().join("file.json"))
    }

    #[test]
    fn test_new_and_all() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        assert!(storage.all().is_empty());

        let user = Record::new(ClassKind::User);
        let key = format!("User.{}", user.id);
        storage.new_record(user);
        assert!(storage.all().contains_key(&key));
        assert!(storage.get(&key).is_some());
    }

    #[test]
    fn test_save_writes_store_keys() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);

        let base = Record::new(ClassKind::BaseModel);
        let amenity = Record::new(ClassKind::Amenity);
        let review = Record::new(ClassKind::Review);
        let keys = [base.key(), amenity.key(), review.key()];
        storage.new_record(base);
        storage.new_record(amenity);
        storage.new_record(review);
        storage.save().unwrap();

        let text = fs::read_to_string(storage.path()).unwrap();
        for key in &keys {
            assert!(text.contains(key.as_str()));
        }
    }

    #[test]
    fn test_reload_restores_every_class() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);

        let mut keys = Vec::new();
        for class in ClassKind::ALL {
            let record = Record::new(class);
            keys.push(record.key());
            storage.new_record(record);
        }
        storage.save().unwrap();

        let mut reloaded = storage_in(&dir);
        reloaded.reload().unwrap();
        assert_eq!(reloaded.all().len(), ClassKind::ALL.len());
        for key in &keys {
            assert_eq!(reloaded.get(key), storage.get(key));
        }
    }

    #[test]
    fn test_reload_replaces_memory_state() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        storage.save().unwrap();

        storage.new_record(Record::new(ClassKind::City));
        storage.reload().unwrap();
        assert!(storage.all().is_empty());
    }

    #[test]
    fn test_reload_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        storage.new_record(Record::new(ClassKind::State));
        storage.reload().unwrap();
        assert!(storage.all().is_empty());
    }

    #[test]
    fn test_reload_skips_unregistered_class() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.json");
        let document = json!({
            "UnregisteredClass.test_id": {"__class__": "UnregisteredClass", "id": "test_id"},
            "State.s1": {
                "__class__": "State",
                "id": "s1",
                "created_at": "2017-09-28T21:03:54.052298",
                "updated_at": "2017-09-28T21:03:54.052302",
                "name": "California"
            }
        });
        fs::write(&path, document.to_string()).unwrap();

        let mut storage = FileStorage::new(&path);
        storage.reload().unwrap();
        assert!(storage.get("UnregisteredClass.test_id").is_none());
        assert_eq!(storage.get("State.s1").unwrap().get("name"), Some(json!("California")));
    }

    #[test]
    fn test_reload_rejects_non_object_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(storage.reload(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_count_by_class() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        storage.new_record(Record::new(ClassKind::User));
        storage.new_record(Record::new(ClassKind::User));
        storage.new_record(Record::new(ClassKind::Place));

        assert_eq!(storage.count(ClassKind::User), 2);
        assert_eq!(storage.count(ClassKind::Place), 1);
        assert_eq!(storage.count(ClassKind::Review), 0);
    }
}

use crate::errors::StorageError;
use crate::models::{DEFAULT_CALORIE_LIMIT, Meal, Workout};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, warn};

pub const CALORIE_LIMIT_KEY: &str = "calorieLimit";
pub const TOTAL_CALORIES_KEY: &str = "totalCalories";
pub const MEALS_KEY: &str = "meals";
pub const WORKOUTS_KEY: &str = "workouts";

const APP_KEYS: [&str; 4] = [CALORIE_LIMIT_KEY, TOTAL_CALORIES_KEY, MEALS_KEY, WORKOUTS_KEY];

/// String-to-string persistent store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Keeps every entry in one JSON object on disk. Entries are cached in memory
/// and the whole file is rewritten on each change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Creates the parent directory if needed. An unreadable file is moved
    /// aside to `<path>.bad` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse data file {}: {err}", path.display());
                    set_aside(&path);
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Read { path, source }),
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(&self.path, payload).map_err(|source| {
            error!("failed to write data file {}: {source}", self.path.display());
            StorageError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

fn set_aside(path: &Path) {
    let mut backup = path.as_os_str().to_os_string();
    backup.push(".bad");
    let backup = PathBuf::from(backup);
    match fs::rename(path, &backup) {
        Ok(()) => warn!("moved unreadable data file to {}", backup.display()),
        Err(err) => error!("failed to move {} aside: {err}", path.display()),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Typed access to the tracker's persisted values.
#[derive(Debug)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calorie_limit(&self) -> i64 {
        self.read_number(CALORIE_LIMIT_KEY, DEFAULT_CALORIE_LIMIT)
    }

    pub fn set_calorie_limit(&mut self, limit: i64) -> Result<(), StorageError> {
        self.store.set(CALORIE_LIMIT_KEY, limit.to_string())
    }

    pub fn total_calories(&self) -> i64 {
        self.read_number(TOTAL_CALORIES_KEY, 0)
    }

    pub fn set_total_calories(&mut self, total: i64) -> Result<(), StorageError> {
        self.store.set(TOTAL_CALORIES_KEY, total.to_string())
    }

    pub fn meals(&self) -> Vec<Meal> {
        self.read_list(MEALS_KEY)
    }

    pub fn set_meals(&mut self, meals: &[Meal]) -> Result<(), StorageError> {
        self.write_list(MEALS_KEY, meals)
    }

    pub fn workouts(&self) -> Vec<Workout> {
        self.read_list(WORKOUTS_KEY)
    }

    pub fn set_workouts(&mut self, workouts: &[Workout]) -> Result<(), StorageError> {
        self.write_list(WORKOUTS_KEY, workouts)
    }

    /// Removes the tracker's own keys; anything else in the store is left alone.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        for key in APP_KEYS {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn read_number(&self, key: &str, default: i64) -> i64 {
        let Some(raw) = self.store.get(key) else {
            return default;
        };
        match raw.trim().parse::<i64>() {
            Ok(value) => value,
            Err(err) => {
                warn!("ignoring malformed {key} value {raw:?}: {err}");
                default
            }
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!("ignoring malformed {key} list: {err}");
                Vec::new()
            }
        }
    }

    fn write_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(items)?;
        self.store.set(key, payload)
    }
}

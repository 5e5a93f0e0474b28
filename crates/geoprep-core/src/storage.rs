//! Local key-value persistence.
//!
//! Two independent records live in the store: the user directory and the
//! evaluation log list. Both follow the same pattern: read the whole value,
//! mutate it in memory, write the whole value back. There is no locking, so
//! concurrent writers race and the last one wins.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::CoreError;
use crate::model::{LogEntry, NewLogEntry, ProfileType, StoredUser};

/// Storage key for the user directory.
pub const USERS_KEY: &str = "hpsc_users_db";
/// Storage key for the evaluation log list.
pub const LOGS_KEY: &str = "hpsc_geo_logs";

/// Opaque string key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

fn storage_err(key: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::Storage {
        key: key.to_string(),
        message: err.to_string(),
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| storage_err(key, e))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| storage_err(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_err(key, e))?;
        tracing::debug!(key, bytes = value.len(), path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(key, e)),
        }
    }
}

/// In-process store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let values = self.values.lock().map_err(|e| storage_err(key, e))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut values = self.values.lock().map_err(|e| storage_err(key, e))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut values = self.values.lock().map_err(|e| storage_err(key, e))?;
        values.remove(key);
        Ok(())
    }
}

fn read_json<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, CoreError> {
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).map_err(|e| storage_err(key, e))
        }
        _ => Ok(T::default()),
    }
}

fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), CoreError> {
    let raw = serde_json::to_string(value).map_err(|e| storage_err(key, e))?;
    store.set(key, &raw)
}

// ---------------------------------------------------------------------------
// User directory
// ---------------------------------------------------------------------------

/// Username -> credential record map.
pub struct UserDirectory<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserDirectory<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn users(&self) -> Result<BTreeMap<String, StoredUser>, CoreError> {
        read_json(self.store, USERS_KEY)
    }

    /// Insert a new user. Returns `false` if the username is already taken.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        profile: ProfileType,
    ) -> Result<bool, CoreError> {
        let mut users = self.users()?;
        if users.contains_key(username) {
            return Ok(false);
        }
        users.insert(
            username.to_string(),
            StoredUser {
                password: password.to_string(),
                profile,
            },
        );
        write_json(self.store, USERS_KEY, &users)?;
        tracing::info!(username, %profile, "registered user");
        Ok(true)
    }

    /// Returns the user's profile if the password matches.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<ProfileType>, CoreError> {
        let users = self.users()?;
        Ok(users
            .get(username)
            .filter(|u| u.password == password)
            .map(|u| u.profile))
    }

    /// Profile for a username, falling back to `General` when unknown or
    /// unreadable.
    pub fn profile_of(&self, username: &str) -> ProfileType {
        match self.users() {
            Ok(users) => users.get(username).map(|u| u.profile).unwrap_or_default(),
            Err(e) => {
                tracing::warn!(username, error = %e, "could not read user directory");
                ProfileType::General
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation log
// ---------------------------------------------------------------------------

/// Append-only list of evaluation log entries.
pub struct LogBook<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> LogBook<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All entries in append order.
    pub fn logs(&self) -> Result<Vec<LogEntry>, CoreError> {
        read_json(self.store, LOGS_KEY)
    }

    pub fn student_logs(&self, student: &str) -> Result<Vec<LogEntry>, CoreError> {
        Ok(self
            .logs()?
            .into_iter()
            .filter(|log| log.student == student)
            .collect())
    }

    /// Assign an id and timestamp and append.
    pub fn save(&self, entry: NewLogEntry) -> Result<LogEntry, CoreError> {
        let mut logs = self.logs()?;
        let saved = LogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            student: entry.student,
            topic: entry.topic,
            question: entry.question,
            module: entry.module,
            result: entry.result,
        };
        logs.push(saved.clone());
        write_json(self.store, LOGS_KEY, &logs)?;
        tracing::debug!(id = %saved.id, student = %saved.student, total = logs.len(), "saved log entry");
        Ok(saved)
    }

    /// Delete every entry.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.store.remove(LOGS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvaluationModule, EvaluationResult};

    fn new_entry(student: &str, score: f64) -> NewLogEntry {
        let mut result = EvaluationResult::default();
        result.user_feedback.score_total = score;
        NewLogEntry {
            student: student.into(),
            topic: "Climatology".into(),
            question: "Why is the monsoon erratic?".into(),
            module: EvaluationModule::InterviewSimulation,
            result,
        }
    }

    #[test]
    fn register_then_authenticate() {
        let store = MemoryStore::new();
        let dir = UserDirectory::new(&store);

        assert!(dir.register("asha", "pw", ProfileType::Fresher).unwrap());
        assert!(!dir.register("asha", "other", ProfileType::General).unwrap());

        assert_eq!(dir.authenticate("asha", "pw").unwrap(), Some(ProfileType::Fresher));
        assert_eq!(dir.authenticate("asha", "wrong").unwrap(), None);
        assert_eq!(dir.authenticate("nobody", "pw").unwrap(), None);
    }

    #[test]
    fn profile_falls_back_to_general() {
        let store = MemoryStore::new();
        let dir = UserDirectory::new(&store);
        dir.register("ravi", "pw", ProfileType::UpscAspirant).unwrap();
        assert_eq!(dir.profile_of("ravi"), ProfileType::UpscAspirant);
        assert_eq!(dir.profile_of("ghost"), ProfileType::General);

        store.set(USERS_KEY, "not json").unwrap();
        assert_eq!(dir.profile_of("ravi"), ProfileType::General);
    }

    #[test]
    fn user_directory_uses_original_wire_shape() {
        let store = MemoryStore::new();
        UserDirectory::new(&store)
            .register("meena", "secret", ProfileType::WorkingProfessional)
            .unwrap();
        let raw = store.get(USERS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["meena"]["password"], "secret");
        assert_eq!(value["meena"]["profile"], "Working Professional");
    }

    #[test]
    fn logs_append_in_order_and_filter_by_student() {
        let store = MemoryStore::new();
        let book = LogBook::new(&store);
        assert!(book.logs().unwrap().is_empty());

        book.save(new_entry("asha", 40.0)).unwrap();
        book.save(new_entry("ravi", 55.0)).unwrap();
        let third = book.save(new_entry("asha", 81.0)).unwrap();

        let all = book.logs().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].id, third.id);

        let scores: Vec<f64> = book.student_logs("asha").unwrap().iter().map(|l| l.score()).collect();
        assert_eq!(scores, vec![40.0, 81.0]);
    }

    #[test]
    fn clear_removes_everything() {
        let store = MemoryStore::new();
        let book = LogBook::new(&store);
        book.save(new_entry("asha", 40.0)).unwrap();
        book.clear().unwrap();
        assert!(book.logs().unwrap().is_empty());
        assert!(store.get(LOGS_KEY).unwrap().is_none());
        // Clearing twice is fine.
        book.clear().unwrap();
    }

    #[test]
    fn file_store_roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.get("missing").unwrap(), None);
        store.set("k", "{\"a\":1}").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("data/k.json").exists());

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }
}

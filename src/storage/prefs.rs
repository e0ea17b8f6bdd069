//! Key-value store backends: a JSON document on disk and an in-memory
//! double for tests.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::storage::KeyValueStore;

const TMP_EXTENSION: &str = "tmp";

/// A single prefs entry. Stored untagged so the document reads as plain
/// `{"key": value}` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum PrefValue {
    Float(f64),
    Text(String),
}

/// Filesystem-backed prefs document. The whole map is rewritten atomically
/// (stage to a temporary file, then rename) on every put.
#[derive(Debug)]
pub struct JsonPrefs {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
}

impl JsonPrefs {
    /// Opens the document at `path`, loading existing values if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension(TMP_EXTENSION);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonPrefs {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(PrefValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), PrefValue::Text(value.to_string()));
        self.flush()
    }

    fn get_float(&self, key: &str) -> f64 {
        match self.values.get(key) {
            Some(PrefValue::Float(value)) => *value,
            _ => 0.0,
        }
    }

    fn put_float(&mut self, key: &str, value: f64) -> Result<()> {
        self.values.insert(key.to_string(), PrefValue::Float(value));
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Volatile store used by tests and as a null backend.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryPrefs {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(PrefValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), PrefValue::Text(value.to_string()));
        Ok(())
    }

    fn get_float(&self, key: &str) -> f64 {
        match self.values.get(key) {
            Some(PrefValue::Float(value)) => *value,
            _ => 0.0,
        }
    }

    fn put_float(&mut self, key: &str, value: f64) -> Result<()> {
        self.values.insert(key.to_string(), PrefValue::Float(value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_float_defaults_to_zero() {
        let prefs = MemoryPrefs::new();
        assert_eq!(prefs.get_float("nope"), 0.0);
        assert_eq!(prefs.get_string("nope"), None);
    }

    #[test]
    fn float_and_string_namespaces_do_not_collide() {
        let mut prefs = MemoryPrefs::new();
        prefs.put_string("day", "2025-01-01").unwrap();
        assert_eq!(prefs.get_float("day"), 0.0);
        prefs.put_float("day", 3.5).unwrap();
        assert_eq!(prefs.get_float("day"), 3.5);
        assert_eq!(prefs.get_string("day"), None);
    }

    #[test]
    fn json_prefs_survive_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("prefs.json");

        let mut prefs = JsonPrefs::open(&path).unwrap();
        prefs.put_string("last_day", "2025-01-01").unwrap();
        prefs.put_float("current_budget", 1000.0).unwrap();
        prefs.put_float("current_spent", 400.0).unwrap();
        drop(prefs);

        let reopened = JsonPrefs::open(&path).unwrap();
        assert_eq!(reopened.get_string("last_day").as_deref(), Some("2025-01-01"));
        assert_eq!(reopened.get_float("current_budget"), 1000.0);
        assert_eq!(reopened.get_float("current_spent"), 400.0);
        assert_eq!(reopened.keys().len(), 3);
        assert!(!path.with_extension(TMP_EXTENSION).exists());
    }

    #[test]
    fn remove_deletes_key_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("prefs.json");

        let mut prefs = JsonPrefs::open(&path).unwrap();
        prefs.put_float("current_spent", 12.0).unwrap();
        prefs.remove("current_spent").unwrap();
        drop(prefs);

        let reopened = JsonPrefs::open(&path).unwrap();
        assert_eq!(reopened.get_float("current_spent"), 0.0);
        assert!(reopened.keys().is_empty());
    }
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{app_data_dir, store_dir_in};
use crate::utils::persistence::{read_optional, write_atomic};

use super::{KeyValueStore, Result};

const DOCUMENT_EXTENSION: &str = "json";

/// File-backed key-value store: each key maps to one JSON document under the
/// root directory, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store rooted in the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(store_dir_in(&app_data_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", file_stem(key), DOCUMENT_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.document_path(key);
        tracing::debug!(path = %path.display(), "reading store document");
        read_optional(&path)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.document_path(key);
        tracing::debug!(path = %path.display(), bytes = value.len(), "writing store document");
        write_atomic(&path, value)
    }
}

/// Encodes a key as a file stem. Lowercase ASCII letters, digits, `-` and
/// `_` pass through; every other byte becomes `%XX`, so distinct keys never
/// share a file, even on case-insensitive filesystems.
fn file_stem(key: &str) -> String {
    if key.is_empty() {
        return "%".into();
    }
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => stem.push(char::from(byte)),
            _ => stem.push_str(&format!("%{byte:02X}")),
        }
    }
    stem
}

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml::{Table, Value};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize session: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Durable scalar storage addressed by `/`-separated keys (`player/lastIndex`).
pub trait KeyValueStore {
    fn value(&self, key: &str) -> Option<&Value>;
    /// Stage a value; nothing reaches durable storage before `sync`.
    fn set_value(&mut self, key: &str, value: Value);
    /// Persist staged values.
    fn sync(&mut self) -> Result<(), StoreError>;
}

/// A TOML document, optionally backed by a file.
///
/// Key segments map to nested tables, so `player/lastFolder` is stored as
/// `lastFolder` inside `[player]`.
#[derive(Debug, Default)]
pub struct TomlStore {
    path: Option<PathBuf>,
    table: Table,
    dirty: bool,
}

impl TomlStore {
    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let table = match fs::read_to_string(path) {
            Ok(text) => toml::from_str::<Table>(&text).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            table,
            dirty: false,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl KeyValueStore for TomlStore {
    fn value(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('/').peekable();
        let mut table = &self.table;
        while let Some(segment) = segments.next() {
            let value = table.get(segment)?;
            if segments.peek().is_none() {
                return Some(value);
            }
            table = value.as_table()?;
        }
        None
    }

    fn set_value(&mut self, key: &str, value: Value) {
        let mut segments: Vec<&str> = key.split('/').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };

        let mut table = &mut self.table;
        for segment in segments {
            let entry = table
                .entry(segment.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            let Value::Table(inner) = entry else {
                return;
            };
            table = inner;
        }

        table.insert(leaf.to_string(), value);
        self.dirty = true;
    }

    fn sync(&mut self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            self.dirty = false;
            return Ok(());
        };
        if !self.dirty {
            return Ok(());
        }

        let text = toml::to_string(&self.table)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        self.dirty = false;
        Ok(())
    }
}

//! Persistence collaborators. The core hands over a serialized snapshot and
//! does not care where it ends up.

use crate::error::RtResult;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait MatchStore {
    fn save(&mut self, serialized: &str) -> RtResult<()>;
    fn load(&mut self) -> RtResult<Option<String>>;
}

/// Snapshot kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MatchStore for JsonFileStore {
    fn save(&mut self, serialized: &str) -> RtResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Replaced via a sibling temp file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn load(&mut self) -> RtResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Some(snapshot.into()),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl MatchStore for MemoryStore {
    fn save(&mut self, serialized: &str) -> RtResult<()> {
        self.snapshot = Some(serialized.to_string());
        self.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> RtResult<Option<String>> {
        Ok(self.snapshot.clone())
    }
}

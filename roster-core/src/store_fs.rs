use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Result, RosterError};
use crate::store::{KeyValueStore, StoreParams};

const STORE_FILE: &str = "storage.json";

/// All keys live in one JSON object file inside the state directory.
/// Every mutation rewrites the whole file through a sibling temp file.
pub struct FsStore {
    dir: PathBuf,
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FsStore {
    pub fn new(params: StoreParams) -> Result<Self> {
        let dir = params.state_dir;
        fs::create_dir_all(&dir)?;
        let path = dir.join(STORE_FILE);

        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), "discarding unreadable store file: {e}");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { dir, path, entries })
    }

    fn flush(&self) -> Result<()> {
        let body = serde_json::to_vec_pretty(&self.entries)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| RosterError::Store(format!("persist {}: {}", self.path.display(), e.error)))?;
        debug!(path = %self.path.display(), keys = self.entries.len(), "store flushed");
        Ok(())
    }
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

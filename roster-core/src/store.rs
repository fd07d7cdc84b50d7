// roster_core/src/store.rs
use crate::error::Result;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct StoreParams {
    pub state_dir: PathBuf,
}

/// Durable string key-value storage. Absence of a key is a normal state.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

use crate::error::Result;
use crate::store::{KeyValueStore, StoreParams};
use crate::store_fs::FsStore;
use crate::store_mem::MemoryStore;

pub enum Backend {
    Fs,
    Memory,
}

pub fn open_store(backend: Backend, p: StoreParams) -> Result<Box<dyn KeyValueStore>> {
    match backend {
        Backend::Fs => Ok(Box::new(FsStore::new(p)?)),
        Backend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

//! Key/value media that hold persisted slots as opaque strings.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use anyhow::Result;

/// A string-keyed store of string blobs. Writes fully replace the previous value.
pub trait SlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

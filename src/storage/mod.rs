pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage slot key for the appointments collection.
pub const SLOT_APPOINTMENTS: &str = "appointments";
/// Storage slot key for the patients collection.
pub const SLOT_PATIENTS: &str = "patients";
/// Storage slot key for the admissions collection.
pub const SLOT_ADMISSIONS: &str = "admissions";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on slot {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Key-value persistence for the entity collections.
///
/// Each slot holds one JSON-serialized array. Implementations are
/// constructor-injected into the stores so tests can swap in
/// `MemoryStorage`.
pub trait StorageAdapter: Send + Sync {
    /// Read the raw JSON payload for a slot. `None` when the slot
    /// has never been written.
    fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the slot contents with a new JSON payload.
    fn write_slot(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}

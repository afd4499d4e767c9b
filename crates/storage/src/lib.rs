#![forbid(unsafe_code)]

pub mod repository;
pub mod session_slot;
pub mod sqlite;

pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError};
pub use session_slot::{DEFAULT_SLOT_KEY, SessionRecord, SessionSlot};

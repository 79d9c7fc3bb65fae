//! # Persistence Adapter
//!
//! String-keyed storage for the cart, modelled on browser local storage.
//!
//! The [`Storage`] trait is the whole contract the cart store consumes: read a key,
//! write a key. Two adapters ship with the crate:
//!
//! - [`MemoryStorage`] - shared in-memory map, used as the fake in tests
//! - [`FileStorage`] - one JSON file per key on disk
//!
//! The stored value format lives in [`envelope`].

pub mod envelope;
pub mod error;
pub mod file;
pub mod memory;

pub use envelope::*;
pub use error::*;
pub use file::*;
pub use memory::*;

/// A string-keyed storage medium.
pub trait Storage: Send + 'static {
    /// Returns the value for `key`, or `None` when nothing was stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

//! permanence-storage
//!
//! JSON document store for form documents and the user config object.
//! Saves always rewrite the whole document: writes to the same form are
//! serialized within one store handle, but two processes appending to the
//! same form concurrently can still lose one update (last write wins).

pub mod error;
pub mod files;
pub mod forms;
pub mod local;
pub mod memory;
pub mod store;

pub use local::{LocalStore, StoreConfig};
pub use memory::MemoryStore;
pub use store::DocumentStore;

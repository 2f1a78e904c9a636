//! Persistence capability for winner history.

mod error;
mod file;
mod history;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use history::{WINNERS_KEY, WinnerHistory};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;

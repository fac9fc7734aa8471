pub mod memory;
pub mod models;
pub mod seed;

pub use memory::{MemStorage, StorageError};

//! Document store implementations

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::{JsonFileStore, MissingFile};

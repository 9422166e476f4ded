//! Smarty Persistence - Profile storage behind an injectable key-value interface

pub mod memory;
pub mod sqlite;
mod store;

pub use memory::MemoryStore;
pub use sqlite::Database;
pub use store::ProfileStore;

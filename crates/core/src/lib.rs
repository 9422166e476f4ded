//! Smarty Core - Shared data models, lesson catalog, types, and errors

pub mod catalog;
pub mod errors;
pub mod models;
pub mod types;

pub use errors::{Error, Result};
pub use models::*;
pub use types::*;

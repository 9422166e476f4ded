//! Data models for Smarty entities

mod lesson;
mod profile;
mod reward;

pub use lesson::*;
pub use profile::*;
pub use reward::*;

//! Command handlers

pub mod auth;
pub mod lessons;
pub mod onboarding;
pub mod settings;
pub mod status;

pub use auth::*;
pub use lessons::*;
pub use onboarding::*;
pub use settings::*;
pub use status::*;

#[cfg(test)]
mod tests;

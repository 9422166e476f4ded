//! Smarty application layer - session lifecycle, commands, and configuration

pub mod commands;
pub mod config;
pub mod insights;
pub mod view;
mod state;

pub use config::AppConfig;
pub use insights::{InsightProvider, TemplateInsights};
pub use state::{AppState, Session};
pub use view::{View, ViewEvent};

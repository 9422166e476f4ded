//! Learning-path insights shown after onboarding
//!
//! Generation sits behind [`InsightProvider`] so a hosted model can be
//! plugged in. The built-in provider composes the text locally.

use async_trait::async_trait;
use smarty_core::{Level, Result, UserProfile};

/// Produces a short personalised insight for a profile
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn generate_insights(&self, user: &UserProfile) -> Result<String>;
}

/// Fallback text when a provider fails
pub const FALLBACK_INSIGHT: &str =
    "Start with the foundations and build a daily habit: one lesson a day keeps your streak alive.";

/// Deterministic insights built from level and interests
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateInsights;

#[async_trait]
impl InsightProvider for TemplateInsights {
    async fn generate_insights(&self, user: &UserProfile) -> Result<String> {
        let opener = match user.level {
            Level::Beginner => "Start with Foundations of AI to learn how machines spot patterns.",
            Level::Intermediate => {
                "You know the basics, so the Generative Frontier course is your next step."
            }
            Level::Advanced => {
                "Jump into Digital Ethics and challenge how models are built and used."
            }
        };

        let interests = match user.interests.as_slice() {
            [] => String::new(),
            [only] => format!(" We'll connect every lesson to {}.", only),
            [first, .., last] => format!(" We'll connect lessons to {} and {}.", first, last),
        };

        let name = if user.name.trim().is_empty() {
            "there"
        } else {
            user.name.trim()
        };

        Ok(format!("Hi {}! {}{}", name, opener, interests))
    }
}

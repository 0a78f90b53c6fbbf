//! Reminder text. A producer always returns something displayable: remote
//! generation failures collapse into one of the fixed fallback messages.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;

use crate::models::UserProfile;

pub use gemini::GeminiMessageProducer;

/// Returned when no API key is configured.
pub const FALLBACK_NO_CREDENTIALS: &str =
    "Küçük bir yudum, büyük bir fark yaratır. Şimdi tam zamanı.";

/// Returned when the generation request or its response fails.
pub const FALLBACK_ON_ERROR: &str = "Potansiyelini serbest bırakmanın ilk adımı. Bir yudum al.";

#[async_trait]
pub trait MessageProducer: Send + Sync {
    async fn reminder_message(&self, profile: &UserProfile) -> String;
}

/// Always answers with the same text. Used when remote generation is disabled.
#[derive(Debug, Clone)]
pub struct FixedMessageProducer {
    message: String,
}

impl FixedMessageProducer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FixedMessageProducer {
    fn default() -> Self {
        Self::new(FALLBACK_NO_CREDENTIALS)
    }
}

#[async_trait]
impl MessageProducer for FixedMessageProducer {
    async fn reminder_message(&self, _profile: &UserProfile) -> String {
        self.message.clone()
    }
}

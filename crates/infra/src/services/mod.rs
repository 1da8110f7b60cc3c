mod email;
mod telegram;

pub use email::{IEmailService, InMemoryEmailService, SentEmail, SmtpEmailService};
pub use telegram::{ITelegramService, InMemoryTelegramService, SentTelegramMessage, TelegramBotService};

use crate::config::Config;
use std::sync::Arc;
use thiserror::Error;

/// Why a channel send failed. Configuration problems are permanent until
/// an operator intervenes; transport problems resolve themselves and the
/// next cycle retries naturally since no dispatch record was written.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    #[error("{0}")]
    NotConfigured(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error(
        "Chat not found: the user needs to send a message to the bot first (chat_id: {0})"
    )]
    ChatNotFound(String),
    #[error("Telegram API error (401): invalid bot token")]
    InvalidBotToken,
    #[error("Telegram API error (403): bot was blocked by the user")]
    BotBlocked,
    #[error("Telegram API error ({code}): {description}")]
    Provider { code: i64, description: String },
}

/// The two reminder delivery channels, interchangeable behind their traits
#[derive(Clone)]
pub struct Services {
    pub email: Arc<dyn IEmailService>,
    pub telegram: Arc<dyn ITelegramService>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        Self {
            email: Arc::new(SmtpEmailService::new(config.smtp.clone())),
            telegram: Arc::new(TelegramBotService::new(config.telegram_bot_token.clone())),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            email: Arc::new(InMemoryEmailService::new()),
            telegram: Arc::new(InMemoryTelegramService::new()),
        }
    }
}

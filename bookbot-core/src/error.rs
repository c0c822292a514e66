use crate::telegram::TelegramError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database connection is not established")]
    DatabaseUnavailable,

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

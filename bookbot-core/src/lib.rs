pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod records;
pub mod telegram;

pub use config::BotConfig;
pub use error::BotError;
pub use records::{PgRecordStore, RecordStore};
pub use telegram::{TelegramClient, TelegramError};

use crate::state::ConversationStore;
use bookbot_core::records::RecordStore;
use bookbot_core::{BotConfig, TelegramClient};
use std::sync::Arc;

/// Everything a handler needs, constructed once at startup and shared as an
/// `Arc`. Tests assemble one from doubles (fake record store, mock Telegram).
pub struct AppContext {
    pub config: BotConfig,
    pub telegram: TelegramClient,
    pub records: Arc<dyn RecordStore>,
    pub conversations: Arc<dyn ConversationStore>,
}

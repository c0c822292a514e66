//! Routes one inbound message: either it answers the current form step, or
//! it is matched as a command. Free text while idle has no handler.

use crate::context::AppContext;
use crate::form;
use bookbot_core::telegram::Message;

pub const GREETING: &str =
    "📅 Hi! This is the booking bot. Send /register to make an appointment.";

/// Entry point for one inbound message, called in arrival order per chat.
pub async fn handle_message(ctx: &AppContext, message: Message) {
    let chat_id = message.chat.id;
    let Some(text) = message.text else {
        // Stickers, photos and the like have no handler.
        return;
    };
    let user_id = message.from.map(|u| u.id).unwrap_or(chat_id);

    // Mid-form, every text — commands included — answers the current step.
    if ctx.conversations.get(chat_id).await.is_some() {
        form::advance(ctx, chat_id, user_id, &text).await;
        return;
    }

    match command(&text) {
        Some("/start") => greet(ctx, chat_id).await,
        Some("/register") => form::begin(ctx, chat_id).await,
        _ => {}
    }
}

/// First token of a command message, with any `@botname` suffix stripped.
fn command(text: &str) -> Option<&str> {
    let first = text.trim().split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    first.split('@').next()
}

async fn greet(ctx: &AppContext, chat_id: i64) {
    if let Err(e) = ctx.telegram.send_message(chat_id, GREETING).await {
        tracing::error!(chat_id, error = %e, "Failed to send greeting");
    }
}

#[cfg(test)]
mod tests {
    use super::command;

    #[test]
    fn plain_commands_match() {
        assert_eq!(command("/start"), Some("/start"));
        assert_eq!(command("/register"), Some("/register"));
    }

    #[test]
    fn botname_suffix_is_stripped() {
        assert_eq!(command("/register@bookbot"), Some("/register"));
    }

    #[test]
    fn arguments_after_the_command_are_ignored() {
        assert_eq!(command("/register now please"), Some("/register"));
    }

    #[test]
    fn free_text_is_not_a_command() {
        assert_eq!(command("hello there"), None);
        assert_eq!(command("   "), None);
        assert_eq!(command(""), None);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        assert_eq!(command("  /start"), Some("/start"));
    }
}

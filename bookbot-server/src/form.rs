//! The three-step registration form.
//!
//! `idle → awaiting_name → awaiting_phone → awaiting_date → idle`. Any text
//! is accepted at every step; the date step submits the record and clears the
//! state whether or not the insert succeeds, so a persistence failure never
//! strands a half-finished form.

use crate::context::AppContext;
use crate::notify;
use crate::state::Conversation;
use bookbot_core::models::NewRecord;

pub const NAME_PROMPT: &str = "Please enter your name:";
pub const PHONE_PROMPT: &str = "📞 Now enter your phone number:";
pub const DATE_PROMPT: &str = "📅 Enter the desired date and time (e.g. 15.07 14:00):";
pub const SAVE_FAILED: &str =
    "⚠ Something went wrong while saving your booking. Please try again later.";

/// `/register`: open a fresh form and ask for the name.
pub async fn begin(ctx: &AppContext, chat_id: i64) {
    ctx.conversations
        .insert(chat_id, Conversation::AwaitingName)
        .await;
    send(ctx, chat_id, NAME_PROMPT).await;
}

/// Feed one message into an in-progress form.
pub async fn advance(ctx: &AppContext, chat_id: i64, user_id: i64, text: &str) {
    let Some(conversation) = ctx.conversations.remove(chat_id).await else {
        return;
    };

    match conversation {
        Conversation::AwaitingName => {
            ctx.conversations
                .insert(
                    chat_id,
                    Conversation::AwaitingPhone {
                        name: text.to_string(),
                    },
                )
                .await;
            send(ctx, chat_id, PHONE_PROMPT).await;
        }
        Conversation::AwaitingPhone { name } => {
            ctx.conversations
                .insert(
                    chat_id,
                    Conversation::AwaitingDate {
                        name,
                        phone: text.to_string(),
                    },
                )
                .await;
            send(ctx, chat_id, DATE_PROMPT).await;
        }
        Conversation::AwaitingDate { name, phone } => {
            // State is already cleared: the form ends here whether or not the
            // insert goes through.
            let record = NewRecord {
                user_id,
                name,
                phone,
                date: text.to_string(),
            };

            if ctx.records.add_record(&record).await {
                notify::send_confirmation(ctx, chat_id, &record).await;
                notify::send_admin_alert(ctx, &record).await;
            } else {
                send(ctx, chat_id, SAVE_FAILED).await;
            }
        }
    }
}

async fn send(ctx: &AppContext, chat_id: i64, text: &str) {
    if let Err(e) = ctx.telegram.send_message(chat_id, text).await {
        tracing::error!(chat_id, error = %e, "Failed to send prompt");
    }
}

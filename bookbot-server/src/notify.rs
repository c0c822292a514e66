//! Outbound notifications for a completed submission: a confirmation back to
//! the user and a summary alert to the administrator chat. The two sends are
//! independent — a failure of either is logged and affects neither the other
//! send nor the stored record.

use crate::context::AppContext;
use bookbot_core::models::NewRecord;

pub fn confirmation_text(record: &NewRecord) -> String {
    format!(
        "✅ Your booking is confirmed!\n\n\
         ▪ Name: {}\n\
         ▪ Phone: {}\n\
         ▪ Date: {}\n\n\
         We will contact you to confirm.",
        record.name, record.phone, record.date
    )
}

pub fn admin_alert_text(record: &NewRecord) -> String {
    format!(
        "📌 New booking!\n\n\
         Client: {}\n\
         Phone: {}\n\
         Date: {}\n\
         User ID: {}",
        record.name, record.phone, record.date, record.user_id
    )
}

pub async fn send_confirmation(ctx: &AppContext, chat_id: i64, record: &NewRecord) {
    if let Err(e) = ctx
        .telegram
        .send_message(chat_id, &confirmation_text(record))
        .await
    {
        tracing::error!(chat_id, error = %e, "Failed to send confirmation");
    }
}

pub async fn send_admin_alert(ctx: &AppContext, record: &NewRecord) {
    let admin_chat_id = ctx.config.telegram.admin_chat_id;
    if let Err(e) = ctx
        .telegram
        .send_message(admin_chat_id, &admin_alert_text(record))
        .await
    {
        tracing::error!(admin_chat_id, error = %e, "Failed to send admin alert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NewRecord {
        NewRecord {
            user_id: 501,
            name: "Jane Doe".to_string(),
            phone: "+1-555-0100".to_string(),
            date: "15.07 14:00".to_string(),
        }
    }

    #[test]
    fn confirmation_echoes_all_three_fields() {
        let text = confirmation_text(&record());
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("+1-555-0100"));
        assert!(text.contains("15.07 14:00"));
    }

    #[test]
    fn admin_alert_includes_the_user_identity() {
        let text = admin_alert_text(&record());
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("+1-555-0100"));
        assert!(text.contains("15.07 14:00"));
        assert!(text.contains("501"));
    }
}

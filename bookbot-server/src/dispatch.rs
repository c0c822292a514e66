//! Per-conversation ordered dispatch.
//!
//! One worker task ("lane") per chat id, fed by an unbounded channel. Events
//! from the same chat are handled strictly in arrival order; different chats
//! interleave freely. Lanes are never torn down, matching the lifetime of the
//! in-memory conversation state.

use crate::context::AppContext;
use crate::router;
use bookbot_core::telegram::{Message, Update};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub struct UpdateDispatcher {
    ctx: Arc<AppContext>,
    lanes: Mutex<HashMap<i64, mpsc::UnboundedSender<Message>>>,
}

impl UpdateDispatcher {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Queue one update. Returns as soon as the message is on its lane; the
    /// webhook acknowledgement never waits for handling.
    pub async fn dispatch(&self, update: Update) {
        let Some(message) = update.message else {
            tracing::debug!(update_id = update.update_id, "Update without message; ignored");
            return;
        };
        let chat_id = message.chat.id;

        let mut lanes = self.lanes.lock().await;
        let send_result = lanes
            .entry(chat_id)
            .or_insert_with(|| spawn_lane(chat_id, Arc::clone(&self.ctx)))
            .send(message);

        if let Err(mpsc::error::SendError(message)) = send_result {
            // The worker died (handler panic); replace the lane and requeue.
            let fresh = spawn_lane(chat_id, Arc::clone(&self.ctx));
            let _ = fresh.send(message);
            lanes.insert(chat_id, fresh);
        }
    }
}

fn spawn_lane(chat_id: i64, ctx: Arc<AppContext>) -> mpsc::UnboundedSender<Message> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            router::handle_message(&ctx, message).await;
        }
        tracing::debug!(chat_id, "Lane closed");
    });

    tx
}

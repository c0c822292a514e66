//! Telegram Bot API client and wire types.
//!
//! Covers exactly the surface the bot uses: inbound `Update` payloads posted
//! to the webhook, and the `sendMessage` / `setWebhook` / `deleteWebhook`
//! methods. Every call goes through the `{base}/bot{token}/{method}` URL
//! scheme and the standard `{ ok, result, ... }` response envelope.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Production Bot API endpoint.
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

// ============================================================================
// Inbound wire types
// ============================================================================

/// One inbound event pushed to the webhook endpoint. Update kinds other than
/// plain messages deserialize with `message: None` and are ignored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

// ============================================================================
// Outbound payloads and the response envelope
// ============================================================================

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SetWebhookPayload<'a> {
    url: &'a str,
    drop_pending_updates: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error_code: Option<u16>,
    #[serde(default)]
    description: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bot API error ({code}): {description}")]
    Api { code: u16, description: String },

    #[error("Missing bot token")]
    MissingToken,
}

// ============================================================================
// TelegramClient
// ============================================================================

#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    token: String,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Result<Self, TelegramError> {
        Self::with_base_url(token, TELEGRAM_API_URL.to_string())
    }

    /// Create a client against a custom base URL (for testing / integration)
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: String,
    ) -> Result<Self, TelegramError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TelegramError::MissingToken);
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            token,
            base_url,
        })
    }

    /// Send a plain-text message (UTF-8, emoji and all) to one chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.call("sendMessage", &SendMessagePayload { chat_id, text })
            .await
    }

    /// Register the delivery endpoint. Pending updates accumulated while the
    /// bot was down are dropped rather than replayed.
    pub async fn set_webhook(&self, url: &str) -> Result<(), TelegramError> {
        self.call(
            "setWebhook",
            &SetWebhookPayload {
                url,
                drop_pending_updates: true,
            },
        )
        .await
    }

    pub async fn delete_webhook(&self) -> Result<(), TelegramError> {
        self.call("deleteWebhook", &serde_json::json!({})).await
    }

    async fn call<P: Serialize + ?Sized>(
        &self,
        api_method: &str,
        payload: &P,
    ) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, api_method);

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let (code, description) = match serde_json::from_str::<ApiResponse>(&error_body) {
                Ok(envelope) => (
                    envelope.error_code.unwrap_or(status.as_u16()),
                    envelope.description.unwrap_or(error_body),
                ),
                Err(_) => (status.as_u16(), error_body),
            };
            tracing::error!(method = api_method, code, description = %description, "Bot API error");
            return Err(TelegramError::Api { code, description });
        }

        let envelope: ApiResponse = response.json().await?;
        if !envelope.ok {
            let code = envelope.error_code.unwrap_or(status.as_u16());
            let description = envelope
                .description
                .unwrap_or_else(|| "unknown error".to_string());
            tracing::error!(method = api_method, code, description = %description, "Bot API error");
            return Err(TelegramError::Api { code, description });
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_envelope() -> serde_json::Value {
        serde_json::json!({ "ok": true, "result": {} })
    }

    #[tokio::test]
    async fn send_message_posts_to_token_scoped_path() {
        let server = MockServer::start().await;
        let client = TelegramClient::with_base_url("test-token", server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .and(path("/bottest-token/sendMessage"))
            .and(body_json(serde_json::json!({ "chat_id": 42, "text": "hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
            .expect(1)
            .mount(&server)
            .await;

        client
            .send_message(42, "hello")
            .await
            .expect("send should succeed");
    }

    #[tokio::test]
    async fn set_webhook_drops_pending_updates() {
        let server = MockServer::start().await;
        let client = TelegramClient::with_base_url("test-token", server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .and(path("/bottest-token/setWebhook"))
            .and(body_json(serde_json::json!({
                "url": "https://bookbot.example.com/webhook",
                "drop_pending_updates": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
            .expect(1)
            .mount(&server)
            .await;

        client
            .set_webhook("https://bookbot.example.com/webhook")
            .await
            .expect("setWebhook should succeed");
    }

    #[tokio::test]
    async fn api_error_surfaces_code_and_description() {
        let server = MockServer::start().await;
        let client = TelegramClient::with_base_url("test-token", server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let err = client.send_message(1, "x").await.expect_err("should fail");
        match err {
            TelegramError::Api { code, description } => {
                assert_eq!(code, 401);
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_false_envelope_is_an_api_error_even_on_200() {
        let server = MockServer::start().await;
        let client = TelegramClient::with_base_url("test-token", server.uri())
            .expect("Failed to create client");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = client.send_message(1, "x").await.expect_err("should fail");
        match err {
            TelegramError::Api { code, description } => {
                assert_eq!(code, 400);
                assert!(description.contains("chat not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_token_is_rejected() {
        assert!(matches!(
            TelegramClient::new("   "),
            Err(TelegramError::MissingToken)
        ));
    }

    #[test]
    fn update_without_message_deserializes() {
        let update: Update =
            serde_json::from_str(r#"{"update_id": 7, "edited_message": {"noise": true}}"#)
                .expect("should deserialize");
        assert_eq!(update.update_id, 7);
        assert!(update.message.is_none());
    }
}

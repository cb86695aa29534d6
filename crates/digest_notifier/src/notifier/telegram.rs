use reqwest::Client;
use serde::Deserialize;

use crate::Notifier;

/// Sends messages to a chat or channel through the Telegram Bot API
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Telegram API error: {status} - {description}")]
    Api { status: u16, description: String },
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            base_url: "https://api.telegram.org".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_markdown(&self, text: &str) -> Result<(), TelegramError> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "MarkdownV2",
        });

        let resp = self
            .client
            .post(format!("{}/bot{}/sendMessage", self.base_url, self.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(redact_url)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = resp.status().as_u16();
        let api_response = resp.json::<ApiResponse>().await.map_err(redact_url)?;

        if !api_response.ok {
            return Err(TelegramError::Api {
                status,
                description: api_response.description.unwrap_or_default(),
            });
        }

        Ok(())
    }
}

/// The request url embeds the bot token
fn redact_url(err: reqwest::Error) -> TelegramError {
    TelegramError::Request(err.without_url())
}

impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> anyhow::Result<()> {
        Ok(self.send_markdown(text).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_error_does_not_leak_bot_token() {
        // nothing listens on the discard port
        let notifier = TelegramNotifier::new("123456:SECRET-TOKEN", "42")
            .with_base_url("http://127.0.0.1:9");

        let err = notifier
            .send_markdown("hi")
            .await
            .expect_err("request to a closed port should fail");

        assert!(matches!(err, TelegramError::Request(_)));
        assert!(!err.to_string().contains("SECRET-TOKEN"), "got: {err}");
        assert!(!format!("{err:?}").contains("SECRET-TOKEN"));
    }
}

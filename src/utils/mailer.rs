use std::time::Duration;

use serde_json::json;
use tracing::info;

use crate::errors::Result;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Outbound mail transport. The API key may be absent; callers are expected
/// to fall back to log-only delivery in that case.
#[derive(Debug, Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_key: Option<String>,
    from: String,
    send_url: String,
}

impl Mailer {
    pub fn new(api_key: Option<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            api_key,
            from: from.into(),
            send_url: SENDGRID_SEND_URL.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let api_key = std::env::var("SENDGRID_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let domain = std::env::var("APP_DOMAIN").unwrap_or_else(|_| "example.app".to_string());
        let from = std::env::var("SEND_FROM").unwrap_or_else(|_| format!("no-reply@{}", domain));

        Self::new(api_key, from)
    }

    /// Point delivery at a different endpoint.
    pub fn with_send_url(mut self, url: impl Into<String>) -> Self {
        self.send_url = url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub const PROVIDER: &'static str = "sendgrid";

    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let Some(api_key) = &self.api_key else {
            // Deliberate no-transport fallback, not an error.
            info!("Email (not sent, no SENDGRID_API_KEY): to={} subject={}", to, subject);
            return Ok(());
        };

        self.client
            .post(&self.send_url)
            .bearer_auth(api_key)
            .json(&json!({
                "personalizations": [{ "to": [{ "email": to }] }],
                "from": { "email": self.from },
                "subject": subject,
                "content": [{ "type": "text/plain", "value": body }],
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

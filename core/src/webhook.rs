//! Client for the report-automation webhook.
//!
//! The webhook accepts a JSON body of `{chatInput, action, sessionId}` and
//! answers with a JSON array whose first element carries an `output` string
//! field. Anything else that still parses as JSON is treated as "received
//! but unusable" and mapped to a fixed fallback string. One request is
//! outstanding per submitted message; there is no automatic retry.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::error::Result;
use crate::error::WiddErr;

pub const ACTION_SEND_MESSAGE: &str = "sendMessage";

/// Shown when the webhook answered 2xx but not in the expected shape.
pub const NO_OUTPUT_FALLBACK: &str = "Message received but no valid response format returned.";

#[derive(Serialize)]
struct WebhookRequest<'a> {
    #[serde(rename = "chatInput")]
    chat_input: &'a str,
    action: &'a str,
    #[serde(rename = "sessionId")]
    session_id: &'a str,
}

pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
    session_id: String,
}

impl WebhookClient {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            url: config.webhook_url.clone(),
            session_id: config.session_id.clone(),
        }
    }

    /// Send one user message and return the webhook's output text.
    pub async fn send(&self, message: &str) -> Result<String> {
        tracing::info!("sending message to webhook");
        let resp = self
            .client
            .post(&self.url)
            .json(&WebhookRequest {
                chat_input: message,
                action: ACTION_SEND_MESSAGE,
                session_id: &self.session_id,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("webhook returned {status}: {body}");
            return Err(WiddErr::UnexpectedStatus(status, body));
        }

        let value = resp.json::<JsonValue>().await?;
        Ok(extract_output(&value).unwrap_or_else(|| NO_OUTPUT_FALLBACK.to_string()))
    }
}

/// Pull the `output` string out of the webhook's array-shaped response.
fn extract_output(value: &JsonValue) -> Option<String> {
    value
        .as_array()?
        .first()?
        .get("output")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn config_for(url: &str) -> Config {
        Config {
            webhook_url: url.to_string(),
            session_id: "test-session".to_string(),
            access_code: None,
            widd_home: std::env::temp_dir(),
        }
    }

    #[test]
    fn extracts_output_from_array_response() {
        let value = serde_json::json!([{ "output": "Sales Report\nall good" }]);
        assert_eq!(
            extract_output(&value),
            Some("Sales Report\nall good".to_string())
        );
    }

    #[test]
    fn missing_output_field_yields_none() {
        assert_eq!(extract_output(&serde_json::json!([{ "text": "x" }])), None);
        assert_eq!(extract_output(&serde_json::json!([])), None);
        assert_eq!(extract_output(&serde_json::json!({ "output": "x" })), None);
        assert_eq!(extract_output(&serde_json::json!([{ "output": 7 }])), None);
    }

    #[tokio::test]
    async fn send_happy_path() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/chat"))
            .and(wiremock::matchers::body_json(serde_json::json!({
                "chatInput": "how were sales?",
                "action": "sendMessage",
                "sessionId": "test-session",
            })))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!([{ "output": "Sales increased by 20%" }]),
            ))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&config_for(&format!("{}/chat", server.uri())));
        let text = client.send("how were sales?").await.expect("send");
        assert_eq!(text, "Sales increased by 20%");
    }

    #[tokio::test]
    async fn send_falls_back_on_unexpected_shape() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "ok": true })),
            )
            .mount(&server)
            .await;

        let client = WebhookClient::new(&config_for(&format!("{}/chat", server.uri())));
        let text = client.send("hello").await.expect("send");
        assert_eq!(text, NO_OUTPUT_FALLBACK);
    }

    #[tokio::test]
    async fn send_surfaces_error_status() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&config_for(&format!("{}/chat", server.uri())));
        let err = client.send("hello").await.expect_err("should fail");
        assert!(matches!(err, WiddErr::UnexpectedStatus(status, _) if status.as_u16() == 500));
    }
}

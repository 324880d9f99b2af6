use crate::config::CheckoutConfig;
use crate::domain::model::{CheckoutSession, LineItem};
use crate::domain::ports::SessionApi;
use crate::utils::error::{CheckoutError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct CreateSessionRequest<'a> {
    items: &'a [LineItem],
}

/// Creates checkout sessions through the shop's server API.
#[derive(Debug, Clone)]
pub struct HttpSessionApi {
    client: Client,
    sessions_url: String,
}

impl HttpSessionApi {
    pub fn new(sessions_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            sessions_url: sessions_url.into(),
        })
    }

    pub fn from_config(config: &CheckoutConfig) -> Result<Self> {
        Self::new(config.sessions_url(), config.request_timeout())
    }
}

fn body_message(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error").and_then(|e| e.get("message")))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn create_session(&self, items: &[LineItem]) -> Result<CheckoutSession> {
        tracing::debug!("POST {} with {} item(s)", self.sessions_url, items.len());
        let response = self
            .client
            .post(&self.sessions_url)
            .json(&CreateSessionRequest { items })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Session API response status: {}", status);
        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);

        if !status.is_success() {
            return Err(CheckoutError::ServerError {
                message: body_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        // The API reports its own failures in-band with a 2xx status.
        if body.get("statusCode").and_then(|c| c.as_u64()) == Some(500) {
            return Err(CheckoutError::ServerError {
                message: body_message(&body).unwrap_or_else(|| "Internal Server Error".to_string()),
            });
        }

        let session: CheckoutSession =
            serde_json::from_value(body).map_err(|e| CheckoutError::ServerError {
                message: format!("Unexpected checkout session response: {}", e),
            })?;
        if session.id.trim().is_empty() {
            return Err(CheckoutError::ServerError {
                message: "Checkout session response has an empty id".to_string(),
            });
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;

    fn api(server: &MockServer) -> HttpSessionApi {
        HttpSessionApi::new(server.url("/api/checkout_sessions"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_create_session_posts_items() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/checkout_sessions")
                .json_body(serde_json::json!({
                    "items": [
                        {"_id": "A", "price": 10.0},
                        {"_id": "B", "price": 5.0}
                    ]
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": "cs_test_abc",
                    "object": "checkout.session",
                    "url": "https://checkout.example.com/c/pay/cs_test_abc"
                }));
        });

        let items = vec![LineItem::new("A", dec!(10)), LineItem::new("B", dec!(5))];
        let session = api(&server).create_session(&items).await.unwrap();

        api_mock.assert();
        assert_eq!(session.id, "cs_test_abc");
        assert_eq!(
            session.url.as_deref(),
            Some("https://checkout.example.com/c/pay/cs_test_abc")
        );
    }

    #[tokio::test]
    async fn test_in_band_500_is_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/checkout_sessions");
            then.status(200).json_body(serde_json::json!({
                "statusCode": 500,
                "message": "No such price"
            }));
        });

        let err = api(&server)
            .create_session(&[LineItem::new("A", dec!(1))])
            .await
            .unwrap_err();

        match err {
            CheckoutError::ServerError { message } => assert_eq!(message, "No such price"),
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_failure_status_is_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/checkout_sessions");
            then.status(503).body("unavailable");
        });

        let err = api(&server)
            .create_session(&[LineItem::new("A", dec!(1))])
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::ServerError { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_response_without_id_is_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/checkout_sessions");
            then.status(200).json_body(serde_json::json!({"object": "checkout.session"}));
        });

        let err = api(&server)
            .create_session(&[LineItem::new("A", dec!(1))])
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::ServerError { .. }));
    }
}

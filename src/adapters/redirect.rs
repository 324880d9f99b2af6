use crate::config::CheckoutConfig;
use crate::domain::model::{CheckoutSession, RedirectTarget};
use crate::domain::ports::Redirector;
use crate::utils::error::{CheckoutError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Deserialize)]
struct ProviderSession {
    url: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// Resolves the provider's hosted checkout page for a session.
#[derive(Debug, Clone)]
pub struct HostedRedirect {
    client: Client,
    provider_url: String,
    publishable_key: String,
}

impl HostedRedirect {
    pub fn new(
        provider_url: impl Into<String>,
        publishable_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            provider_url: provider_url.into(),
            publishable_key: publishable_key.into(),
        })
    }

    pub fn from_config(config: &CheckoutConfig) -> Result<Self> {
        Self::new(
            config.provider_url(),
            config.provider.publishable_key.clone(),
            config.request_timeout(),
        )
    }

    fn session_endpoint(&self, session_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.provider_url).map_err(|e| redirect_error(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| redirect_error(format!("{} cannot be a base URL", self.provider_url)))?
            .pop_if_empty()
            .extend(["v1", "checkout", "sessions", session_id]);
        Ok(url)
    }
}

fn redirect_error(message: impl Into<String>) -> CheckoutError {
    CheckoutError::RedirectError {
        message: message.into(),
    }
}

#[async_trait]
impl Redirector for HostedRedirect {
    async fn resolve(&self, session: &CheckoutSession) -> Result<RedirectTarget> {
        if let Some(url) = session.url.as_deref().and_then(|u| Url::parse(u).ok()) {
            return Ok(RedirectTarget {
                session_id: session.id.clone(),
                url,
            });
        }

        let endpoint = self.session_endpoint(&session.id)?;
        tracing::debug!("Resolving hosted checkout via {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .bearer_auth(&self.publishable_key)
            .send()
            .await
            .map_err(|e| redirect_error(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| redirect_error(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(redirect_error(message));
        }

        let hosted = serde_json::from_str::<ProviderSession>(&text)
            .ok()
            .and_then(|body| body.url)
            .ok_or_else(|| redirect_error("Provider did not return a checkout URL"))?;
        let url = Url::parse(&hosted).map_err(|e| redirect_error(e.to_string()))?;

        Ok(RedirectTarget {
            session_id: session.id.clone(),
            url,
        })
    }
}

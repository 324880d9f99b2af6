use crate::domain::model::{CheckoutSession, LineItem, RedirectTarget};
use crate::domain::ports::{Redirector, SessionApi};
use crate::utils::error::CheckoutError;
use serde::Serialize;

/// Result of one checkout attempt. Only `Redirect` leaves the application;
/// every other outcome keeps the basket as it was so the user can retry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Redirect(RedirectTarget),
    ServerError { message: String },
    RedirectError { message: String },
    EmptyBag,
}

impl CheckoutOutcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, CheckoutOutcome::Redirect(_))
    }

    /// Failures as errors, for callers that propagate with `?`.
    pub fn into_result(self) -> crate::Result<Option<RedirectTarget>> {
        match self {
            CheckoutOutcome::Redirect(target) => Ok(Some(target)),
            CheckoutOutcome::EmptyBag => Ok(None),
            CheckoutOutcome::ServerError { message } => Err(CheckoutError::ServerError { message }),
            CheckoutOutcome::RedirectError { message } => {
                Err(CheckoutError::RedirectError { message })
            }
        }
    }
}

/// Create-session-then-redirect, as two explicit steps.
pub struct CheckoutFlow<S: SessionApi, R: Redirector> {
    sessions: S,
    redirector: R,
}

impl<S: SessionApi, R: Redirector> CheckoutFlow<S, R> {
    pub fn new(sessions: S, redirector: R) -> Self {
        Self {
            sessions,
            redirector,
        }
    }

    pub async fn initiate(&self, items: &[LineItem]) -> CheckoutOutcome {
        if items.is_empty() {
            tracing::info!("Bag is empty, checkout is unavailable");
            return CheckoutOutcome::EmptyBag;
        }

        tracing::info!("Creating checkout session for {} item(s)", items.len());
        let session = match self.sessions.create_session(items).await {
            Ok(session) => session,
            Err(e) => {
                let message = failure_message(e);
                tracing::error!("Checkout session creation failed: {}", message);
                return CheckoutOutcome::ServerError { message };
            }
        };
        tracing::debug!("Checkout session created: {}", session.id);

        match self.redirect(&session).await {
            Ok(target) => {
                tracing::info!("Redirecting to hosted checkout: {}", target.url);
                CheckoutOutcome::Redirect(target)
            }
            Err(e) => {
                let message = failure_message(e);
                tracing::warn!("Redirect to checkout failed: {}", message);
                CheckoutOutcome::RedirectError { message }
            }
        }
    }

    async fn redirect(&self, session: &CheckoutSession) -> crate::Result<RedirectTarget> {
        self.redirector.resolve(session).await
    }
}

fn failure_message(error: CheckoutError) -> String {
    match error {
        CheckoutError::ServerError { message } | CheckoutError::RedirectError { message } => {
            message
        }
        other => other.to_string(),
    }
}

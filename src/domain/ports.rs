use crate::domain::model::{CheckoutSession, LineItem, RedirectTarget};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Step one of checkout: the shop's server creates a hosted session.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn create_session(&self, items: &[LineItem]) -> Result<CheckoutSession>;
}

/// Step two of checkout: resolve where the hosted payment page lives.
#[async_trait]
pub trait Redirector: Send + Sync {
    async fn resolve(&self, session: &CheckoutSession) -> Result<RedirectTarget>;
}

/// Supplies a basket snapshot.
pub trait BasketSource: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<LineItem>>> + Send;
}

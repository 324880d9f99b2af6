pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{HostedRedirect, HttpSessionApi, LocalBasketFile};
pub use crate::config::CheckoutConfig;
pub use crate::core::aggregator::{compute_total, group_by_product};
pub use crate::core::basket::{Basket, BasketStore};
pub use crate::core::checkout::{CheckoutFlow, CheckoutOutcome};
pub use crate::core::review::{BagReview, CheckoutAvailability, ProductLine};
pub use crate::domain::model::{CheckoutSession, GroupedBasket, LineItem, ProductKey, RedirectTarget};
pub use crate::utils::error::{CheckoutError, Result};

pub mod aggregator;
pub mod basket;
pub mod checkout;
pub mod review;

pub use crate::domain::model::{GroupedBasket, LineItem, ProductKey};
pub use crate::domain::ports::{BasketSource, Redirector, SessionApi};
pub use crate::utils::error::Result;

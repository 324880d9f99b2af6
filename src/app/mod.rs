// Application layer: the CLI subcommands, returning what they print so they can be tested.

use crate::adapters::{HostedRedirect, HttpSessionApi, LocalBasketFile};
use crate::config::toml_config::DEFAULT_CURRENCY;
use crate::config::CheckoutConfig;
use crate::core::checkout::{CheckoutFlow, CheckoutOutcome};
use crate::core::review::BagReview;
use crate::domain::model::LineItem;
use crate::domain::ports::BasketSource;
use crate::utils::error::Result;
use crate::utils::formatting::format_currency;
use crate::utils::validation::{validate_currency_code, Validate};
use std::fmt::Write;
use std::path::Path;

async fn load_basket(path: &str) -> Result<Vec<LineItem>> {
    LocalBasketFile::new(path).load().await
}

/// Display currency from the config file, when one is present.
fn display_currency(config_path: &str) -> Result<String> {
    if !Path::new(config_path).exists() {
        return Ok(DEFAULT_CURRENCY.to_string());
    }
    let config = CheckoutConfig::from_file(config_path)?;
    Ok(config.currency().to_string())
}

/// `review`: the bag as text or JSON. `currency` overrides the config file.
pub async fn review_basket(
    config_path: &str,
    basket_path: &str,
    currency: Option<&str>,
    json: bool,
) -> Result<String> {
    let currency = match currency {
        Some(currency) => currency.to_string(),
        None => display_currency(config_path)?,
    };
    validate_currency_code("--currency", &currency)?;

    let items = load_basket(basket_path).await?;
    let review = BagReview::from_items(&items);
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&review)?))
    } else {
        Ok(review.render_text(&currency))
    }
}

/// `checkout`: create a session and report where to pay. `api_url` overrides
/// `api.base_url` before validation.
pub async fn checkout_basket(
    config_path: &str,
    basket_path: &str,
    api_url: Option<&str>,
) -> Result<String> {
    tracing::info!("📁 Loading configuration from: {}", config_path);
    let mut config = CheckoutConfig::from_file(config_path)?;
    if let Some(api_url) = api_url {
        tracing::info!("🔧 api.base_url overridden to: {}", api_url);
        config.api.base_url = api_url.to_string();
    }
    config.validate()?;

    let items = load_basket(basket_path).await?;
    let review = BagReview::from_items(&items);
    let mut out = String::new();
    if !review.checkout_enabled() {
        let _ = writeln!(out, "{}", review.headline);
        return Ok(out);
    }
    let _ = writeln!(
        out,
        "Pay in full: {}",
        format_currency(review.total, config.currency())
    );

    let flow = CheckoutFlow::new(
        HttpSessionApi::from_config(&config)?,
        HostedRedirect::from_config(&config)?,
    );
    match flow.initiate(&items).await {
        CheckoutOutcome::Redirect(target) => {
            let _ = writeln!(out, "✅ Checkout session {} created", target.session_id);
            let _ = writeln!(out, "🔗 Continue to payment: {}", target.url);
            Ok(out)
        }
        CheckoutOutcome::EmptyBag => {
            let _ = writeln!(out, "{}", review.headline);
            Ok(out)
        }
        failed => failed.into_result().map(|_| out),
    }
}

#[cfg(feature = "cli")]
pub async fn run(cli: crate::config::CliConfig) -> Result<String> {
    use crate::config::Command;

    match cli.command {
        Command::Review {
            basket,
            json,
            currency,
        } => review_basket(&cli.config, &basket, currency.as_deref(), json).await,
        Command::Checkout { basket, api_url } => {
            checkout_basket(&cli.config, &basket, api_url.as_deref()).await
        }
    }
}

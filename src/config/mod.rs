pub mod toml_config;

pub use toml_config::CheckoutConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "bag-checkout")]
#[command(about = "Review a storefront bag and start a hosted checkout")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "checkout.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the grouped bag with subtotal and total
    Review {
        /// JSON file holding the basket snapshot
        #[arg(short, long)]
        basket: String,

        /// Print the review as JSON
        #[arg(long)]
        json: bool,

        /// Currency used for display, overrides the config file
        #[arg(long)]
        currency: Option<String>,
    },
    /// Create a checkout session and print the hosted checkout URL
    Checkout {
        /// JSON file holding the basket snapshot
        #[arg(short, long)]
        basket: String,

        /// Override api.base_url from the config file
        #[arg(long)]
        api_url: Option<String>,
    },
}

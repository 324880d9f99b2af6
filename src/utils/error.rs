use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid basket item at position {index}: {reason}")]
    InvalidLineItem { index: usize, reason: String },

    #[error("Checkout session request failed: {message}")]
    ServerError { message: String },

    #[error("Redirect to hosted checkout failed: {message}")]
    RedirectError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
    Checkout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for the CLI. Retryable checkout failures exit with 2.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CheckoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckoutError::HttpError(_) => ErrorCategory::Network,
            CheckoutError::IoError(_) => ErrorCategory::System,
            CheckoutError::SerializationError(_) | CheckoutError::InvalidLineItem { .. } => {
                ErrorCategory::Data
            }
            CheckoutError::ConfigValidationError { .. }
            | CheckoutError::InvalidConfigValueError { .. }
            | CheckoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CheckoutError::ServerError { .. } | CheckoutError::RedirectError { .. } => {
                ErrorCategory::Checkout
            }
        }
    }

    /// Server and redirect failures can be retried by hand, so they rank below
    /// broken input or configuration.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CheckoutError::ServerError { .. }
            | CheckoutError::RedirectError { .. }
            | CheckoutError::HttpError(_) => ErrorSeverity::Medium,
            CheckoutError::SerializationError(_)
            | CheckoutError::InvalidLineItem { .. }
            | CheckoutError::ConfigValidationError { .. }
            | CheckoutError::InvalidConfigValueError { .. }
            | CheckoutError::MissingConfigError { .. } => ErrorSeverity::High,
            CheckoutError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CheckoutError::HttpError(_) => {
                "Could not reach the checkout service.".to_string()
            }
            CheckoutError::IoError(e) => format!("Could not read a local file: {}", e),
            CheckoutError::SerializationError(_) => {
                "The basket or a service response is not valid JSON.".to_string()
            }
            CheckoutError::ConfigValidationError { field, .. }
            | CheckoutError::InvalidConfigValueError { field, .. }
            | CheckoutError::MissingConfigError { field } => {
                format!("The configuration value '{}' is invalid or missing.", field)
            }
            CheckoutError::InvalidLineItem { index, reason } => {
                format!("Basket item #{} is invalid: {}", index + 1, reason)
            }
            CheckoutError::ServerError { message } => {
                format!("The checkout session could not be created: {}", message)
            }
            CheckoutError::RedirectError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the api.base_url setting",
            ErrorCategory::Configuration => "Fix the configuration file and run the command again",
            ErrorCategory::Data => "Check that the basket file contains valid line items",
            ErrorCategory::System => "Check that the file exists and is readable",
            ErrorCategory::Checkout => "Your bag was not changed; try checking out again",
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;

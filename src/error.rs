use std::io;
use std::result::Result as StdResult;
use thiserror::Error;

/// Failures of the price / percent-change math.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PricingError {
    #[error("Invalid baseline: price {price} with change {percent}% has no recoverable starting price")]
    InvalidBaseline { price: f64, percent: f64 },
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
    #[error("Non-finite value in percent change calculation")]
    NonFinite,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = StdResult<T, Error>;

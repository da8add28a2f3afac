pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod market;
pub mod preferences;
pub mod render;
pub mod types;
pub mod view;

pub use error::{Error, PricingError, Result};

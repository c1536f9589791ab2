//! VoiceCart storefront backend: accounts, catalogue, checkout with
//! gateway-verified payments, per-item fulfilment and seller approval.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::AppServices;
pub use config::AppConfig;
pub use error::AppError;

use stargazer_api::FetchError;
use thiserror::Error;

/// All the ways the engine itself can fail
///
/// Fetch failures are not fatal and normally end up as notifications
/// instead of travelling through this type; it only shows up at the edges
/// (config files, theme persistence, one-shot CLI fetches).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

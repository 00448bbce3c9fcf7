//! Application configuration loaded from environment variables.
//!
//! - `DEPTHVIEW_HOST` — feed host (and optional port), e.g. `market.example.com:8000`
//! - `DEPTHVIEW_PAIR` — trading pair as `base/relative`, defaults to `btc/usd`
//! - `DEPTHVIEW_SECURE` — `1`/`true` switches the feed URL from `ws` to `wss`
//! - `DEPTHVIEW_TRADE_CAPACITY` — trade history retention bound, defaults to 200

use crate::view::DEFAULT_TRADE_CAPACITY;

/// Default trading pair when `DEPTHVIEW_PAIR` is unset.
const DEFAULT_PAIR: &str = "btc/usd";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub feed: FeedConfig,
    /// Maximum number of trades retained in the view.
    pub trade_capacity: usize,
}

/// Feed endpoint configuration.
#[derive(Debug)]
pub struct FeedConfig {
    pub host: String,
    pub base_currency: String,
    pub relative_currency: String,
    pub secure: bool,
}

impl FeedConfig {
    /// Builds the per-pair WebSocket URL, switching scheme on the
    /// secure flag.
    #[must_use]
    pub fn feed_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!(
            "{}://{}/exchange/{}/{}/",
            scheme,
            self.host,
            self.base_currency.to_lowercase(),
            self.relative_currency.to_lowercase()
        )
    }

    /// The pair in display form, e.g. `BTC/USD`.
    #[must_use]
    pub fn pair_label(&self) -> String {
        format!(
            "{}/{}",
            self.base_currency.to_uppercase(),
            self.relative_currency.to_uppercase()
        )
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`DepthviewError::Config`](crate::DepthviewError::Config) if
/// `DEPTHVIEW_HOST` is missing, the pair is not `base/relative`, or the
/// trade capacity is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let host = non_empty_var("DEPTHVIEW_HOST").ok_or_else(|| {
        crate::DepthviewError::Config("DEPTHVIEW_HOST is not set".to_string())
    })?;

    let pair = non_empty_var("DEPTHVIEW_PAIR").unwrap_or_else(|| DEFAULT_PAIR.to_string());
    let (base_currency, relative_currency) = parse_pair(&pair)?;

    let secure = non_empty_var("DEPTHVIEW_SECURE")
        .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes"));

    let trade_capacity = match non_empty_var("DEPTHVIEW_TRADE_CAPACITY") {
        Some(raw) => raw.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
            crate::DepthviewError::Config(format!(
                "DEPTHVIEW_TRADE_CAPACITY must be a positive integer, got {raw:?}"
            ))
        })?,
        None => DEFAULT_TRADE_CAPACITY,
    };

    Ok(AppConfig {
        feed: FeedConfig {
            host,
            base_currency,
            relative_currency,
            secure,
        },
        trade_capacity,
    })
}

/// Splits a `base/relative` pair string into its two currency codes.
fn parse_pair(pair: &str) -> crate::Result<(String, String)> {
    match pair.split('/').collect::<Vec<_>>().as_slice() {
        [base, relative] if !base.is_empty() && !relative.is_empty() => {
            Ok(((*base).to_string(), (*relative).to_string()))
        }
        _ => Err(crate::DepthviewError::Config(format!(
            "DEPTHVIEW_PAIR must look like base/relative, got {pair:?}"
        ))),
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

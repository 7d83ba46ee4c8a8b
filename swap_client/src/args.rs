//! Command-line arguments for the swap client.
//!
//! Every flag falls back to a `SWAP_*` environment variable (a `.env` file in
//! the working directory is loaded first). See `main` for end-to-end usage.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use swap_common::SwapConfig;
use swap_common::SwapError;
use swap_common::config::{DEFAULT_SLIPPAGE, FEE_RATE, FLAT_FEE, MAX_SLIPPAGE};
use swap_common::format::DEFAULT_DECIMALS;
use swap_common::net::{ICON_BASE, PRICES_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// URL of the JSON price feed.
    #[clap(long, env = "SWAP_PRICES_URL", default_value = PRICES_URL)]
    pub prices_url: String,

    /// Read price rows from a local JSON file instead of the network.
    #[clap(long, env = "SWAP_PRICES_FILE")]
    pub prices_file: Option<String>,

    /// Prefix of token icon URLs.
    #[clap(long, env = "SWAP_ICON_BASE", default_value = ICON_BASE)]
    pub icon_base: String,

    /// Slippage tolerance applied when none is entered, in percent.
    #[clap(long, env = "SWAP_DEFAULT_SLIPPAGE", default_value_t = DEFAULT_SLIPPAGE)]
    pub default_slippage: f64,

    /// Upper bound of the slippage tolerance, in percent.
    #[clap(long, env = "SWAP_MAX_SLIPPAGE", default_value_t = MAX_SLIPPAGE)]
    pub max_slippage: f64,

    /// Proportional fee charged on the quoted amount.
    #[clap(long, env = "SWAP_FEE_RATE", default_value_t = FEE_RATE)]
    pub fee_rate: f64,

    /// Flat fee added to every quote.
    #[clap(long, env = "SWAP_FLAT_FEE", default_value_t = FLAT_FEE)]
    pub flat_fee: f64,

    /// Quiet window before an amount edit is requoted, in milliseconds.
    #[clap(long, env = "SWAP_AMOUNT_DEBOUNCE_MS", default_value_t = 120)]
    pub amount_debounce_ms: u64,

    /// Quiet window before a token search runs, in milliseconds.
    #[clap(long, env = "SWAP_SEARCH_DEBOUNCE_MS", default_value_t = 100)]
    pub search_debounce_ms: u64,

    /// Simulated submission latency, in milliseconds.
    #[clap(long, env = "SWAP_SUBMIT_DELAY_MS", default_value_t = 1200)]
    pub submit_delay_ms: u64,

    /// Timeout of the price feed request, in seconds.
    #[clap(long, env = "SWAP_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub http_timeout_secs: u64,
}

impl Args {
    /// Build and validate the engine configuration.
    pub fn to_config(&self) -> Result<SwapConfig, SwapError> {
        let config = SwapConfig {
            prices_url: self.prices_url.trim().to_string(),
            icon_base: self.icon_base.trim().to_string(),
            fee_rate: self.fee_rate,
            flat_fee: self.flat_fee,
            default_slippage: self.default_slippage,
            max_slippage: self.max_slippage,
            amount_debounce: Duration::from_millis(self.amount_debounce_ms),
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            submit_delay: Duration::from_millis(self.submit_delay_ms),
            display_decimals: DEFAULT_DECIMALS,
        };
        config.validate()?;
        Ok(config)
    }

    /// The prices file, if one was given.
    pub fn prices_path(&self) -> Option<PathBuf> {
        self.prices_file.as_deref().map(normalize_path)
    }

    /// Request timeout for the price feed.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

//! Tunables of the swap form.
//!
//! `SwapConfig::default()` reproduces the stock form: 0.2% + 0.0005 fee,
//! 0.5% default slippage capped at 5%, 120 ms amount debounce, 100 ms search
//! debounce and a 1.2 s simulated submission.
use std::time::Duration;

use crate::error::SwapError;
use crate::format::DEFAULT_DECIMALS;
use crate::net::{ICON_BASE, PRICES_URL};

/// Default proportional fee applied to the quoted output.
pub const FEE_RATE: f64 = 0.002;
/// Default flat fee added on top of the proportional part.
pub const FLAT_FEE: f64 = 0.0005;
/// Slippage used when the input is unset or unparsable.
pub const DEFAULT_SLIPPAGE: f64 = 0.5;
/// Upper bound of the slippage tolerance, in percent.
pub const MAX_SLIPPAGE: f64 = 5.0;

/// Runtime configuration of the engine and the client event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapConfig {
    /// Price feed URL.
    pub prices_url: String,
    /// Icon URL prefix.
    pub icon_base: String,
    /// Proportional fee.
    pub fee_rate: f64,
    /// Flat fee.
    pub flat_fee: f64,
    /// Slippage applied when none (or zero) is entered.
    pub default_slippage: f64,
    /// Slippage clamp ceiling.
    pub max_slippage: f64,
    /// Coalescing window for amount edits.
    pub amount_debounce: Duration,
    /// Coalescing window for token search input.
    pub search_debounce: Duration,
    /// Simulated submission latency.
    pub submit_delay: Duration,
    /// Maximum fraction digits for amounts below 1000.
    pub display_decimals: usize,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            prices_url: PRICES_URL.to_string(),
            icon_base: ICON_BASE.to_string(),
            fee_rate: FEE_RATE,
            flat_fee: FLAT_FEE,
            default_slippage: DEFAULT_SLIPPAGE,
            max_slippage: MAX_SLIPPAGE,
            amount_debounce: Duration::from_millis(120),
            search_debounce: Duration::from_millis(100),
            submit_delay: Duration::from_millis(1200),
            display_decimals: DEFAULT_DECIMALS,
        }
    }
}

impl SwapConfig {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), SwapError> {
        if !self.fee_rate.is_finite() || self.fee_rate < 0.0 {
            return Err(SwapError::InvalidConfig(format!(
                "fee rate must be a non-negative number, got {}",
                self.fee_rate
            )));
        }
        if !self.flat_fee.is_finite() || self.flat_fee < 0.0 {
            return Err(SwapError::InvalidConfig(format!(
                "flat fee must be a non-negative number, got {}",
                self.flat_fee
            )));
        }
        if !self.max_slippage.is_finite() || self.max_slippage <= 0.0 || self.max_slippage >= 100.0 {
            return Err(SwapError::InvalidConfig(format!(
                "max slippage must be within (0, 100), got {}",
                self.max_slippage
            )));
        }
        if !(0.0..=self.max_slippage).contains(&self.default_slippage) {
            return Err(SwapError::InvalidConfig(format!(
                "default slippage {} is outside [0, {}]",
                self.default_slippage, self.max_slippage
            )));
        }
        if self.prices_url.trim().is_empty() {
            return Err(SwapError::InvalidConfig("prices URL is empty".to_string()));
        }
        Ok(())
    }
}

//! Error types shared between the engine and the client.
//!
//! `QuoteError` lists the reasons a quote or a submission is blocked; its
//! `Display` text is what the form shows to the user. `SwapError` unifies the
//! remaining failure cases (I/O, JSON, price fetch, channels, configuration)
//! so crates can propagate a single error type.
use std::io;

use thiserror::Error;

/// Reasons the form refuses to quote or submit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    /// The price feed could not be loaded; persists until restart.
    #[error("Failed to load prices")]
    PricesUnavailable,

    /// One or both sides have no token.
    #[error("Select both tokens")]
    MissingToken,

    /// Both sides hold the same symbol.
    #[error("Select two different tokens")]
    SameToken,

    /// The driving amount is empty, non-finite or not positive.
    #[error("Enter an amount")]
    InvalidAmount,

    /// A submission is already in flight.
    #[error("Swap already in progress")]
    AlreadySubmitting,
}

impl QuoteError {
    /// Whether the reason is surfaced as error text.
    ///
    /// An empty amount is a normal resting state of the form, so it only
    /// disables submission.
    pub fn shows_message(&self) -> bool {
        !matches!(self, QuoteError::InvalidAmount)
    }
}

/// Unified error type for the swap workspace.
#[derive(Error, Debug)]
pub enum SwapError {
    /// I/O error originating from files, stdin or stdout.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The price source could not deliver rows.
    #[error("Price fetch failed: {0}")]
    PriceFetch(String),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A user command could not be parsed.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(QuoteError::MissingToken.to_string(), "Select both tokens");
        assert_eq!(QuoteError::SameToken.to_string(), "Select two different tokens");
        assert_eq!(QuoteError::InvalidAmount.to_string(), "Enter an amount");
        assert_eq!(QuoteError::PricesUnavailable.to_string(), "Failed to load prices");
    }

    #[test]
    fn test_empty_amount_is_silent() {
        assert!(!QuoteError::InvalidAmount.shows_message());
        assert!(QuoteError::SameToken.shows_message());
    }
}

//!
//! Core of the token swap form shared by the terminal client and its tests.
//!
//! This crate aggregates:
//! - `error`: `QuoteError` blocking reasons and the workspace-wide `SwapError`.
//! - `result`: handy `Result<T, SwapError>` alias.
//! - `config`: `SwapConfig` tunables (fees, slippage bounds, timer windows).
//! - `net`: price feed and icon endpoints.
//! - `format`: display formatting for amounts, rates and fees.
//! - `amount`: parsing of free-form, comma-tolerant amount text.
//! - `token`: token descriptors built from raw price rows, plus search.
//! - `prices`: the `PriceSource` collaborator trait and local sources.
//! - `balance`: placeholder balance simulation and the max-amount parser.
//! - `quote`: the `QuoteEngine` state machine.
//! - `submission`: pending swaps and submission summaries.
//! - `schedule`: debounce and one-shot timer abstractions.
#![warn(missing_docs)]
pub mod amount;
pub mod balance;
pub mod config;
pub mod error;
pub mod format;
pub mod net;
pub mod prices;
pub mod quote;
pub mod result;
pub mod schedule;
pub mod submission;
pub mod token;

pub use config::SwapConfig;
pub use error::{QuoteError, SwapError};
pub use quote::{QuoteEngine, QuoteOutcome, QuoteState, Side};
pub use result::Result;
pub use token::{Token, TokenList};

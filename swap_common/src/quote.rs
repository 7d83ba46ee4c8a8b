//! # Quote Engine
//!
//! Owns the form state (`QuoteState`) and recomputes the dependent amount,
//! rate, fee and minimum received whenever an input changes.
//!
//! Every mutating operation returns a `QuoteOutcome` carrying the display
//! strings and the submit gate; the caller only renders it.
//!
//! Validation runs in a fixed order and stops at the first failure:
//! prices loaded, both tokens selected, tokens distinct, driving amount
//! positive. An unusable amount clears the dependent field and disables
//! submission without error text.
//!
//! Driving the "to" side computes the input by dividing by the rate and
//! charges the fee against the entered "to" amount; no minimum received is
//! reported in that direction.
use log::{debug, info};
use strum_macros::{Display, EnumString};

use crate::amount::{parse_float_prefix, parse_positive_amount};
use crate::balance::parse_balance_text;
use crate::config::SwapConfig;
use crate::error::QuoteError;
use crate::format::{PLACEHOLDER, format_number};
use crate::submission::{PendingSwap, SubmissionPhase, SwapSummary};
use crate::token::{Token, TokenList};

/// One side of the swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Side {
    /// The token being sold.
    From,
    /// The token being bought.
    To,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

/// Mutable state of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteState {
    /// Token being sold.
    pub from_token: Option<Token>,
    /// Token being bought.
    pub to_token: Option<Token>,
    /// Raw or formatted text of the from amount.
    pub from_amount_text: String,
    /// Raw or formatted text of the to amount.
    pub to_amount_text: String,
    /// Slippage tolerance in percent, already clamped.
    pub slippage_percent: f64,
    /// A submission is in flight.
    pub submitting: bool,
}

impl QuoteState {
    fn new(slippage_percent: f64) -> Self {
        Self {
            from_token: None,
            to_token: None,
            from_amount_text: String::new(),
            to_amount_text: String::new(),
            slippage_percent,
            submitting: false,
        }
    }

    /// Token selected for `side`.
    pub fn token(&self, side: Side) -> Option<&Token> {
        match side {
            Side::From => self.from_token.as_ref(),
            Side::To => self.to_token.as_ref(),
        }
    }

    /// Amount text of `side`.
    pub fn amount_text(&self, side: Side) -> &str {
        match side {
            Side::From => &self.from_amount_text,
            Side::To => &self.to_amount_text,
        }
    }

    fn amount_text_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::From => &mut self.from_amount_text,
            Side::To => &mut self.to_amount_text,
        }
    }

    fn token_mut(&mut self, side: Side) -> &mut Option<Token> {
        match side {
            Side::From => &mut self.from_token,
            Side::To => &mut self.to_token,
        }
    }
}

/// Proportional plus flat fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    /// Fraction of the amount.
    pub rate: f64,
    /// Added on top.
    pub flat: f64,
}

impl FeeSchedule {
    /// Fee charged on `amount`.
    pub fn fee_for(&self, amount: f64) -> f64 {
        amount * self.rate + self.flat
    }
}

/// A computed quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Which side drove the computation.
    pub direction: Side,
    /// Amount of the from token.
    pub input_amount: f64,
    /// Amount of the to token, before fees.
    pub output_amount: f64,
    /// Units of the to token per unit of the from token.
    pub rate: f64,
    /// Fee in units of the to token.
    pub fee: f64,
    /// Worst acceptable output; only for from-driven quotes.
    pub min_received: Option<f64>,
}

/// Observable result of a recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOutcome {
    /// `"1 FROM = X TO"` or the placeholder.
    pub rate_text: String,
    /// `"X TO"` or the placeholder.
    pub fee_text: String,
    /// Inline error, empty when there is nothing to say.
    pub error_text: String,
    /// Whether the submit action is available.
    pub submit_enabled: bool,
    /// Why submission is unavailable.
    pub blocked_by: Option<QuoteError>,
    /// Minimum received annotation for from-driven quotes.
    pub min_received_text: Option<String>,
    /// A submission is in flight.
    pub loading: bool,
    /// The quote, when one could be computed.
    pub quote: Option<Quote>,
}

/// The form's state machine.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    state: QuoteState,
    fees: FeeSchedule,
    default_slippage: f64,
    max_slippage: f64,
    decimals: usize,
    prices_available: bool,
    last_driver: Side,
}

impl QuoteEngine {
    /// Engine with nothing selected.
    pub fn new(config: &SwapConfig) -> Self {
        Self {
            state: QuoteState::new(config.default_slippage),
            fees: FeeSchedule {
                rate: config.fee_rate,
                flat: config.flat_fee,
            },
            default_slippage: config.default_slippage,
            max_slippage: config.max_slippage,
            decimals: config.display_decimals,
            prices_available: true,
            last_driver: Side::From,
        }
    }

    /// Current state.
    pub fn state(&self) -> &QuoteState {
        &self.state
    }

    /// Submission phase derived from the submitting flag.
    pub fn phase(&self) -> SubmissionPhase {
        if self.state.submitting {
            SubmissionPhase::Submitting
        } else {
            SubmissionPhase::Idle
        }
    }

    /// Whether the price feed loaded.
    pub fn prices_available(&self) -> bool {
        self.prices_available
    }

    /// `from.price / to.price`, when both tokens are selected.
    pub fn rate(&self) -> Option<f64> {
        match (&self.state.from_token, &self.state.to_token) {
            (Some(from), Some(to)) => Some(from.price / to.price),
            _ => None,
        }
    }

    /// Interpret slippage input: unset, unparsable or zero fall back to the
    /// default; anything else is clamped to `[0, max]`.
    pub fn parse_slippage(&self, text: &str) -> f64 {
        match parse_float_prefix(text) {
            Some(value) if value != 0.0 => value.clamp(0.0, self.max_slippage),
            _ => self.default_slippage,
        }
    }

    /// Put `token` on `side` and requote from the from amount.
    pub fn select_token(&mut self, side: Side, token: Token) -> QuoteOutcome {
        debug!("Selected {} for {} side", token.symbol, side);
        *self.state.token_mut(side) = Some(token);
        self.recompute(Side::From)
    }

    /// Select the first two tokens of `list`, if it has two.
    pub fn apply_initial_selection(&mut self, list: &TokenList) -> Option<QuoteOutcome> {
        let (from, to) = list.initial_pair()?;
        self.state.from_token = Some(from.clone());
        self.state.to_token = Some(to.clone());
        Some(self.recompute(Side::From))
    }

    /// Exchange tokens and amounts between the two sides.
    pub fn switch_sides(&mut self) -> QuoteOutcome {
        let state = &mut self.state;
        std::mem::swap(&mut state.from_token, &mut state.to_token);
        std::mem::swap(&mut state.from_amount_text, &mut state.to_amount_text);
        self.recompute(Side::From)
    }

    /// Store amount text without requoting; used while an edit is debounced.
    pub fn set_amount_text(&mut self, side: Side, text: &str) {
        *self.state.amount_text_mut(side) = text.to_string();
    }

    /// Store amount text for `side` and requote with it driving.
    pub fn edit_amount(&mut self, side: Side, text: &str) -> QuoteOutcome {
        self.set_amount_text(side, text);
        self.recompute(side)
    }

    /// Update the slippage tolerance and requote from the from amount.
    pub fn set_slippage(&mut self, text: &str) -> QuoteOutcome {
        self.state.slippage_percent = self.parse_slippage(text);
        self.recompute(Side::From)
    }

    /// Copy the amount out of a rendered balance line into the from field.
    pub fn set_max(&mut self, balance_text: &str) -> Option<QuoteOutcome> {
        let amount = parse_balance_text(balance_text)?;
        Some(self.edit_amount(Side::From, &amount))
    }

    /// Record that the price feed failed. Submission stays disabled.
    pub fn mark_prices_unavailable(&mut self) -> QuoteOutcome {
        self.prices_available = false;
        self.recompute(self.last_driver)
    }

    /// Requote with the last driving side.
    pub fn refresh(&mut self) -> QuoteOutcome {
        self.recompute(self.last_driver)
    }

    /// Recompute the quote with `driver` as the edited side.
    pub fn recompute(&mut self, driver: Side) -> QuoteOutcome {
        self.last_driver = driver;
        let rate = match self.check_selection() {
            Ok(rate) => rate,
            Err(reason) => return self.blocked(reason),
        };
        let Some(amount) = parse_positive_amount(self.state.amount_text(driver)) else {
            self.state.amount_text_mut(driver.opposite()).clear();
            return self.blocked(QuoteError::InvalidAmount);
        };

        let quote = match driver {
            Side::From => {
                let output = amount * rate;
                Quote {
                    direction: driver,
                    input_amount: amount,
                    output_amount: output,
                    rate,
                    fee: self.fees.fee_for(output),
                    min_received: Some(output * (1.0 - self.state.slippage_percent / 100.0)),
                }
            }
            Side::To => Quote {
                direction: driver,
                input_amount: amount / rate,
                output_amount: amount,
                rate,
                fee: self.fees.fee_for(amount),
                min_received: None,
            },
        };

        let dependent = match driver {
            Side::From => quote.output_amount,
            Side::To => quote.input_amount,
        };
        if !(dependent.is_finite() && dependent > 0.0) {
            debug!("Dependent amount {} is out of range", dependent);
            self.state.amount_text_mut(driver.opposite()).clear();
            return self.blocked(QuoteError::InvalidAmount);
        }
        *self.state.amount_text_mut(driver.opposite()) = format_number(dependent, self.decimals);
        debug!(
            "Quote ({}-driven): {} -> {} at rate {}, fee {}",
            driver, quote.input_amount, quote.output_amount, rate, quote.fee
        );

        let min_received_text = quote.min_received.map(|min| {
            format!(
                "Minimum received (with {}% slippage): {} {}",
                self.state.slippage_percent,
                format_number(min, self.decimals),
                self.symbol(Side::To)
            )
        });
        let submitting = self.state.submitting;

        QuoteOutcome {
            rate_text: self.rate_text(),
            fee_text: self.fee_text(Some(quote.fee)),
            error_text: String::new(),
            submit_enabled: !submitting,
            blocked_by: submitting.then_some(QuoteError::AlreadySubmitting),
            min_received_text,
            loading: submitting,
            quote: Some(quote),
        }
    }

    /// Enter the submitting phase, capturing what is being swapped.
    ///
    /// The quote is recomputed from the last driving side first, so the
    /// captured amounts always belong to one quote.
    pub fn begin_submission(&mut self) -> Result<PendingSwap, QuoteError> {
        if self.state.submitting {
            return Err(QuoteError::AlreadySubmitting);
        }
        if let Some(reason) = self.refresh().blocked_by {
            return Err(reason);
        }
        let from_amount =
            parse_positive_amount(&self.state.from_amount_text).ok_or(QuoteError::InvalidAmount)?;

        let pending = PendingSwap {
            from_amount,
            from_symbol: self.symbol(Side::From).to_string(),
            to_amount_text: self.state.to_amount_text.clone(),
            to_symbol: self.symbol(Side::To).to_string(),
            slippage_percent: self.state.slippage_percent,
            started_at: chrono::Utc::now(),
        };
        self.state.submitting = true;
        info!(
            "Submitting swap: {} {} -> {} {}",
            pending.from_amount, pending.from_symbol, pending.to_amount_text, pending.to_symbol
        );
        Ok(pending)
    }

    /// Leave the submitting phase and summarize the swap.
    pub fn complete_submission(&mut self, pending: PendingSwap) -> SwapSummary {
        self.state.submitting = false;
        info!("Swap of {} {} completed", pending.from_amount, pending.from_symbol);
        SwapSummary::new(pending)
    }

    /// Rate of a valid, distinct pair.
    fn check_selection(&self) -> Result<f64, QuoteError> {
        if !self.prices_available {
            return Err(QuoteError::PricesUnavailable);
        }
        match (&self.state.from_token, &self.state.to_token) {
            (Some(from), Some(to)) if from.symbol == to.symbol => Err(QuoteError::SameToken),
            (Some(from), Some(to)) => Ok(from.price / to.price),
            _ => Err(QuoteError::MissingToken),
        }
    }

    fn blocked(&self, reason: QuoteError) -> QuoteOutcome {
        debug!("Quote blocked: {}", reason);
        QuoteOutcome {
            rate_text: self.rate_text(),
            fee_text: self.fee_text(None),
            error_text: if reason.shows_message() {
                reason.to_string()
            } else {
                String::new()
            },
            submit_enabled: false,
            blocked_by: Some(reason),
            min_received_text: None,
            loading: self.state.submitting,
            quote: None,
        }
    }

    fn symbol(&self, side: Side) -> &str {
        self.state.token(side).map(|t| t.symbol.as_str()).unwrap_or("")
    }

    fn rate_text(&self) -> String {
        match self.rate().filter(|r| r.is_finite()) {
            Some(rate) => format!(
                "1 {} = {} {}",
                self.symbol(Side::From),
                format_number(rate, 6),
                self.symbol(Side::To)
            ),
            None => PLACEHOLDER.to_string(),
        }
    }

    fn fee_text(&self, fee: Option<f64>) -> String {
        match fee.filter(|f| f.is_finite()) {
            Some(fee) => format!("{} {}", format_number(fee, 6), self.symbol(Side::To)),
            None => PLACEHOLDER.to_string(),
        }
    }
}

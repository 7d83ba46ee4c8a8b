//! Simulated swap submission.
//!
//! A submission moves the engine from `Idle` to `Submitting`, captures a
//! `PendingSwap` snapshot, and returns to `Idle` when the simulated delay
//! elapses, producing a `SwapSummary`. There is no failure path.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

/// Phase of the submission state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SubmissionPhase {
    /// Ready to accept a submission.
    Idle,
    /// Waiting for the simulated submission to complete.
    Submitting,
}

/// Snapshot of the form at the moment submit was accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingSwap {
    /// Parsed from amount.
    pub from_amount: f64,
    /// From symbol.
    pub from_symbol: String,
    /// Displayed to amount.
    pub to_amount_text: String,
    /// To symbol.
    pub to_symbol: String,
    /// Slippage tolerance in percent.
    pub slippage_percent: f64,
    /// When the submission started.
    pub started_at: DateTime<Utc>,
}

/// Confirmation shown once the simulated submission completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapSummary {
    /// The swap that was submitted.
    pub swap: PendingSwap,
    /// When the submission completed.
    pub completed_at: DateTime<Utc>,
}

impl SwapSummary {
    /// Wrap a completed swap.
    pub fn new(swap: PendingSwap) -> Self {
        Self {
            swap,
            completed_at: Utc::now(),
        }
    }
}

impl fmt::Display for SwapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Swap submitted!")?;
        writeln!(f)?;
        writeln!(f, "From: {} {}", self.swap.from_amount, self.swap.from_symbol)?;
        writeln!(f, "To:   {} {}", self.swap.to_amount_text, self.swap.to_symbol)?;
        write!(f, "Slippage: {}%", self.swap.slippage_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text() {
        let summary = SwapSummary::new(PendingSwap {
            from_amount: 1.5,
            from_symbol: "ETH".to_string(),
            to_amount_text: "4,500".to_string(),
            to_symbol: "USDC".to_string(),
            slippage_percent: 0.5,
            started_at: Utc::now(),
        });
        assert_eq!(
            summary.to_string(),
            "Swap submitted!\n\nFrom: 1.5 ETH\nTo:   4,500 USDC\nSlippage: 0.5%"
        );
    }

    #[test]
    fn test_whole_amounts_print_without_fraction() {
        let summary = SwapSummary::new(PendingSwap {
            from_amount: 2.0,
            from_symbol: "ATOM".to_string(),
            to_amount_text: "14.2".to_string(),
            to_symbol: "USDC".to_string(),
            slippage_percent: 1.0,
            started_at: Utc::now(),
        });
        assert!(summary.to_string().contains("From: 2 ATOM"));
        assert!(summary.to_string().ends_with("Slippage: 1%"));
    }
}

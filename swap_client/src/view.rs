//! Text rendering of the form.
//!
//! Rendering only reads engine output; it never touches engine state.
use std::io::{self, Write};

use swap_common::balance::balance_text;
use swap_common::format::{PLACEHOLDER, format_number};
use swap_common::submission::SwapSummary;
use swap_common::{QuoteOutcome, QuoteState, Side, Token};

/// Print the whole form for `state` and the latest `outcome`.
pub fn render_form<W: Write>(out: &mut W, state: &QuoteState, outcome: &QuoteOutcome) -> io::Result<()> {
    writeln!(
        out,
        "From  {:<8} {:<18} {}",
        symbol_or_placeholder(state, Side::From),
        state.from_amount_text,
        balance_text(state.from_token.as_ref())
    )?;
    writeln!(
        out,
        "To    {:<8} {}",
        symbol_or_placeholder(state, Side::To),
        state.to_amount_text
    )?;
    writeln!(out, "Rate  {}", outcome.rate_text)?;
    writeln!(out, "Fee   {}", outcome.fee_text)?;
    if let Some(hint) = &outcome.min_received_text {
        writeln!(out, "      {}", hint)?;
    }
    writeln!(out, "{}", submit_label(outcome))?;
    if !outcome.error_text.is_empty() {
        writeln!(out, "! {}", outcome.error_text)?;
    }
    out.flush()
}

/// Label of the submit control.
pub fn submit_label(outcome: &QuoteOutcome) -> String {
    if outcome.loading {
        "[ Submitting... ]".to_string()
    } else if outcome.submit_enabled {
        "[ Swap ]".to_string()
    } else {
        match &outcome.blocked_by {
            Some(reason) => format!("[ {} ] (disabled)", reason),
            None => "[ Swap ] (disabled)".to_string(),
        }
    }
}

/// Print a token list, one `SYMBOL  $price  icon` row per token.
pub fn render_tokens<W: Write>(out: &mut W, tokens: &[&Token]) -> io::Result<()> {
    if tokens.is_empty() {
        writeln!(out, "No tokens match")?;
    }
    for token in tokens {
        writeln!(
            out,
            "  {:<10} ${:<16} {}",
            token.symbol,
            format_number(token.price, 6),
            token.icon_url
        )?;
    }
    out.flush()
}

/// Print the confirmation of a completed submission.
pub fn render_summary<W: Write>(out: &mut W, summary: &SwapSummary) -> io::Result<()> {
    writeln!(out, "{}", summary)?;
    out.flush()
}

/// Print a one-line notice.
pub fn render_message<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message)?;
    out.flush()
}

fn symbol_or_placeholder(state: &QuoteState, side: Side) -> &str {
    state
        .token(side)
        .map(|t| t.symbol.as_str())
        .unwrap_or(PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swap_common::QuoteError;

    fn outcome() -> QuoteOutcome {
        QuoteOutcome {
            rate_text: PLACEHOLDER.to_string(),
            fee_text: PLACEHOLDER.to_string(),
            error_text: String::new(),
            submit_enabled: false,
            blocked_by: Some(QuoteError::InvalidAmount),
            min_received_text: None,
            loading: false,
            quote: None,
        }
    }

    #[test]
    fn test_submit_labels() {
        let mut o = outcome();
        assert_eq!(submit_label(&o), "[ Enter an amount ] (disabled)");
        o.submit_enabled = true;
        o.blocked_by = None;
        assert_eq!(submit_label(&o), "[ Swap ]");
        o.loading = true;
        assert_eq!(submit_label(&o), "[ Submitting... ]");
    }

    #[test]
    fn test_empty_token_list() {
        let mut out = Vec::new();
        render_tokens(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No tokens match\n");
    }
}

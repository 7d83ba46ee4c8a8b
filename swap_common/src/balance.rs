//! Placeholder balances.
//!
//! There is no wallet behind the form. The "balance" of a token is derived
//! from a hash of its symbol so that it is stable between runs; replace with a
//! real lookup once one exists. The max-amount shortcut reads the number back
//! out of the rendered balance string.
use crate::format::{PLACEHOLDER, format_number};
use crate::token::Token;

const BALANCE_PREFIX: &str = "Balance:";

/// Deterministic fake balance in `[0, 99.9]`.
pub fn simulated_balance(symbol: &str) -> f64 {
    let mut hash: i32 = 0;
    for unit in symbol.encode_utf16() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(unit as i32);
    }
    (hash % 1000).abs() as f64 / 10.0
}

/// Rendered balance line for the from side.
pub fn balance_text(token: Option<&Token>) -> String {
    match token {
        Some(token) => format!(
            "{} {} {}",
            BALANCE_PREFIX,
            format_number(simulated_balance(&token.symbol), 4),
            token.symbol
        ),
        None => format!("{} {}", BALANCE_PREFIX, PLACEHOLDER),
    }
}

/// Extract the amount from a `"Balance: X SYM"` string.
///
/// Expects exactly one whitespace character after the prefix and returns the
/// run of digits, dots and commas that follows.
pub fn parse_balance_text(text: &str) -> Option<String> {
    let start = text.find(BALANCE_PREFIX)? + BALANCE_PREFIX.len();
    let mut rest = text[start..].chars();
    if !rest.next()?.is_whitespace() {
        return None;
    }
    let amount: String = rest
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    (!amount.is_empty()).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str) -> Token {
        Token {
            symbol: symbol.to_string(),
            price: 1.0,
            icon_url: String::new(),
        }
    }

    #[test]
    fn test_simulated_balance_is_stable() {
        // E=69, T=84, H=72 -> 68985
        assert_eq!(simulated_balance("ETH"), 98.5);
        assert_eq!(simulated_balance(""), 0.0);
        assert_eq!(simulated_balance("ETH"), simulated_balance("ETH"));
    }

    #[test]
    fn test_simulated_balance_handles_overflow() {
        let bal = simulated_balance("AVERYLONGTOKENSYMBOLTHATOVERFLOWS");
        assert!((0.0..100.0).contains(&bal));
    }

    #[test]
    fn test_balance_text() {
        assert_eq!(balance_text(Some(&token("ETH"))), "Balance: 98.5 ETH");
        assert_eq!(balance_text(None), "Balance: —");
    }

    #[test]
    fn test_parse_balance_text() {
        assert_eq!(parse_balance_text("Balance: 98.5 ETH").as_deref(), Some("98.5"));
        assert_eq!(parse_balance_text("Balance: 1,234.5 USDC").as_deref(), Some("1,234.5"));
        assert_eq!(parse_balance_text("Balance: —"), None);
        assert_eq!(parse_balance_text("Balance:98.5"), None);
        assert_eq!(parse_balance_text("nothing"), None);
    }
}

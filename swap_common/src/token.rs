//! Token descriptors built from raw price rows, and the searchable token list.

use std::collections::HashSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::net::icon_url;

/// A swappable token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Uppercase, trimmed symbol; unique within a `TokenList`.
    pub symbol: String,
    /// USD price, always positive and finite.
    pub price: f64,
    /// Icon location derived from the symbol.
    pub icon_url: String,
}

/// A raw row of the price feed.
///
/// The feed is loosely typed: either field may be missing or carry the wrong
/// JSON type. The symbol is read from `symbol` first, then `currency`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRow {
    #[serde(default)]
    symbol: Option<Value>,
    #[serde(default)]
    currency: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
}

impl PriceRow {
    /// Normalized symbol, if the row carries a usable one.
    ///
    /// Rows without `symbol` fall back to `currency`, the key the public feed
    /// actually uses; only rows missing both are dropped.
    pub fn symbol(&self) -> Option<String> {
        let raw = self.symbol.as_ref().or(self.currency.as_ref())?;
        let text = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
            _ => return None,
        };
        let symbol = text.trim().to_uppercase();
        (!symbol.is_empty()).then_some(symbol)
    }

    /// Price, if numeric, finite and positive.
    pub fn price(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// Build the token set: drop malformed rows, keep the first row per symbol,
/// sort by symbol.
pub fn build_tokens(rows: &[Value], icon_base: &str) -> Vec<Token> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for value in rows {
        if !value.is_object() {
            debug!("Dropping non-object price row: {}", value);
            continue;
        }
        let Ok(row) = serde_json::from_value::<PriceRow>(value.clone()) else {
            debug!("Dropping unreadable price row: {}", value);
            continue;
        };
        let (Some(symbol), Some(price)) = (row.symbol(), row.price()) else {
            debug!("Dropping malformed price row: {}", value);
            continue;
        };
        if !seen.insert(symbol.clone()) {
            continue;
        }
        tokens.push(Token {
            icon_url: icon_url(icon_base, &symbol),
            symbol,
            price,
        });
    }

    tokens.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    info!("Built {} tokens from {} price rows", tokens.len(), rows.len());
    tokens
}

/// The deduplicated, sorted set of tokens the user can pick from.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Build a list from raw feed rows.
    pub fn from_rows(rows: &[Value], icon_base: &str) -> Self {
        Self {
            tokens: build_tokens(rows, icon_base),
        }
    }

    /// All tokens in symbol order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Case-insensitive exact lookup.
    pub fn find(&self, symbol: &str) -> Option<&Token> {
        let wanted = symbol.trim().to_uppercase();
        self.tokens.iter().find(|t| t.symbol == wanted)
    }

    /// Tokens whose symbol contains `query`, ignoring case. A blank query matches all.
    pub fn search(&self, query: &str) -> Vec<&Token> {
        filter_tokens(&self.tokens, query)
    }

    /// The default from/to pair: the first two tokens in symbol order.
    pub fn initial_pair(&self) -> Option<(&Token, &Token)> {
        match self.tokens.as_slice() {
            [first, second, ..] => Some((first, second)),
            _ => None,
        }
    }
}

/// Filter `tokens` by case-insensitive symbol substring, preserving order.
pub fn filter_tokens<'a>(tokens: &'a [Token], query: &str) -> Vec<&'a Token> {
    let q = query.trim().to_uppercase();
    tokens
        .iter()
        .filter(|t| q.is_empty() || t.symbol.contains(&q))
        .collect()
}

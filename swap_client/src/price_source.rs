//! Fetching the price feed.
//!
//! The feed is requested once, on a background thread, and the result is
//! posted to the form's event channel as `FormEvent::PricesLoaded`.
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{debug, error, info};
use serde_json::Value;
use swap_common::SwapError;
use swap_common::prices::{PriceSource, parse_rows};

use crate::form::FormEvent;

/// Price feed served over HTTP(S).
pub struct HttpPriceSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpPriceSource {
    /// Create a source for `url` with a request timeout.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SwapError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SwapError::PriceFetch(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch_rows(&self) -> Result<Vec<Value>, SwapError> {
        debug!("Requesting prices from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SwapError::PriceFetch(format!("Price request failed: {}", e)))?;
        let body = response
            .bytes()
            .map_err(|e| SwapError::PriceFetch(format!("Price body read failed: {}", e)))?;
        parse_rows(&body[..])
    }
}

/// Fetch from `source` and post the result, whatever it is, to `tx`.
pub fn deliver_prices(source: &dyn PriceSource, tx: &Sender<FormEvent>) -> Result<(), SwapError> {
    let result = source.fetch_rows();
    match &result {
        Ok(rows) => info!("Price feed returned {} rows", rows.len()),
        Err(e) => error!("Price feed failed: {}", e),
    }
    tx.send(FormEvent::PricesLoaded(result))
        .map_err(|_| SwapError::ChannelSend("form stopped before prices arrived".to_string()))
}

/// Run `source` once on a background thread and post the result to `tx`.
pub fn spawn_price_fetch(source: Box<dyn PriceSource>, tx: Sender<FormEvent>) {
    thread::spawn(move || {
        if let Err(e) = deliver_prices(source.as_ref(), &tx) {
            error!("Failed to deliver prices: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use serde_json::json;
    use swap_common::prices::StaticPriceSource;

    #[test]
    fn test_fetch_result_is_posted() {
        let (tx, rx) = unbounded();
        let source = StaticPriceSource::new(vec![json!({"symbol": "ETH", "price": 1.0})]);
        spawn_price_fetch(Box::new(source), tx);
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            FormEvent::PricesLoaded(Ok(rows)) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_closed_form_reports_send_failure() {
        let (tx, rx) = unbounded();
        drop(rx);
        let source = StaticPriceSource::new(vec![json!({"symbol": "ETH", "price": 1.0})]);
        assert!(matches!(
            deliver_prices(&source, &tx),
            Err(SwapError::ChannelSend(_))
        ));
    }

    #[test]
    fn test_unreachable_host_fails() {
        let source = HttpPriceSource::new("http://127.0.0.1:9/prices.json", Duration::from_secs(2)).unwrap();
        assert!(matches!(source.fetch_rows(), Err(SwapError::PriceFetch(_))));
    }
}

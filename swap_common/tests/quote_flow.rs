use serde_json::json;
use swap_common::balance::balance_text;
use swap_common::prices::{PriceSource, StaticPriceSource};
use swap_common::submission::SubmissionPhase;
use swap_common::{QuoteEngine, QuoteError, Side, SwapConfig, TokenList};

fn feed() -> StaticPriceSource {
    StaticPriceSource::new(vec![
        json!({"currency": "USDC", "date": "2023-08-29T07:10:30.000Z", "price": 1.0}),
        json!({"currency": "ETH", "date": "2023-08-29T07:10:52.000Z", "price": 1645.9337373737374}),
        json!({"currency": "ATOM", "date": "2023-08-29T07:10:50.000Z", "price": 7.186657333333334}),
        json!({"currency": "ETH", "date": "2023-08-29T07:10:40.000Z", "price": 1646.0}),
        json!({"currency": "SWTH", "date": "2023-08-29T07:10:52.000Z", "price": 0.004039850455012084}),
        json!({"currency": "BROKEN", "price": "n/a"}),
    ])
}

fn loaded_engine() -> (QuoteEngine, TokenList) {
    let config = SwapConfig::default();
    let rows = feed().fetch_rows().unwrap();
    let list = TokenList::from_rows(&rows, &config.icon_base);
    let mut engine = QuoteEngine::new(&config);
    engine.apply_initial_selection(&list).unwrap();
    (engine, list)
}

#[test]
fn startup_selects_first_two_tokens() {
    let (engine, list) = loaded_engine();
    let symbols: Vec<&str> = list.tokens().iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["ATOM", "ETH", "SWTH", "USDC"]);

    let state = engine.state();
    assert_eq!(state.from_token.as_ref().unwrap().symbol, "ATOM");
    assert_eq!(state.to_token.as_ref().unwrap().symbol, "ETH");
    assert_eq!(list.find("eth").unwrap().price, 1645.9337373737374);
}

#[test]
fn empty_form_waits_for_amount() {
    let (mut engine, _) = loaded_engine();
    let outcome = engine.refresh();
    assert!(!outcome.submit_enabled);
    assert_eq!(outcome.blocked_by, Some(QuoteError::InvalidAmount));
    assert!(outcome.error_text.is_empty());
}

#[test]
fn forward_then_reverse_round_trips() {
    let (mut engine, list) = loaded_engine();
    engine.select_token(Side::To, list.find("USDC").unwrap().clone());

    for x in [0.25, 1.0, 3.5, 12.75, 250.0] {
        engine.edit_amount(Side::From, &x.to_string());
        let dependent = engine.state().to_amount_text.clone();
        engine.edit_amount(Side::To, &dependent);
        let back: f64 = engine.state().from_amount_text.replace(',', "").parse().unwrap();
        assert!((back - x).abs() / x < 1e-4, "{} came back as {}", x, back);
    }
}

#[test]
fn switching_twice_restores_selection() {
    let (mut engine, _) = loaded_engine();
    engine.edit_amount(Side::From, "10");
    let before = engine.state().clone();
    engine.switch_sides();
    engine.switch_sides();
    assert_eq!(engine.state().from_token, before.from_token);
    assert_eq!(engine.state().to_token, before.to_token);
}

#[test]
fn max_shortcut_then_submit() {
    let (mut engine, _) = loaded_engine();
    let balance = balance_text(engine.state().from_token.as_ref());
    let outcome = engine.set_max(&balance).unwrap();
    assert!(outcome.submit_enabled);

    let pending = engine.begin_submission().unwrap();
    assert_eq!(engine.phase(), SubmissionPhase::Submitting);
    assert_eq!(pending.from_symbol, "ATOM");
    assert_eq!(pending.to_symbol, "ETH");

    let summary = engine.complete_submission(pending);
    assert_eq!(engine.phase(), SubmissionPhase::Idle);
    let text = summary.to_string();
    assert!(text.starts_with("Swap submitted!"));
    assert!(text.ends_with("Slippage: 0.5%"));
}

#[test]
fn failed_feed_blocks_everything() {
    let config = SwapConfig::default();
    let mut engine = QuoteEngine::new(&config);
    let outcome = engine.mark_prices_unavailable();
    assert_eq!(outcome.error_text, "Failed to load prices");
    let outcome = engine.edit_amount(Side::From, "1");
    assert!(!outcome.submit_enabled);
    assert_eq!(outcome.error_text, "Failed to load prices");
}

//! The interactive swap form.
//!
//! `SwapForm` ties the `QuoteEngine` to its collaborators: the token list,
//! the amount and search debouncers, the submission timer and the output
//! sink. `run_event_loop` drives it from a single thread:
//!
//! - `FormEvent`s (stdin lines, the price feed result, shutdown) arrive on a
//!   crossbeam channel fed by background threads;
//! - the nearest pending deadline is turned into a `crossbeam_channel::at`
//!   timer, and `select!` waits on both.
//!
//! All engine work runs on the loop thread, so no state is shared.
use std::io::Write;
use std::time::Instant;

use crossbeam_channel::{Receiver, at, never, select};
use log::{debug, error, info, warn};
use serde_json::Value;
use swap_common::balance::balance_text;
use swap_common::schedule::{Debouncer, OneShotTimer, earliest};
use swap_common::submission::PendingSwap;
use swap_common::{QuoteEngine, QuoteOutcome, Side, SwapConfig, SwapError, TokenList};

use crate::command::{FormCommand, HELP};
use crate::view;

/// Input to the form's event loop.
#[derive(Debug)]
pub enum FormEvent {
    /// A line typed by the user.
    Line(String),
    /// The one-time price feed result.
    PricesLoaded(Result<Vec<Value>, SwapError>),
    /// Stop the loop.
    Shutdown,
}

/// Whether the loop keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Leave the loop.
    Exit,
}

/// Form controller writing its view to `W`.
pub struct SwapForm<W: Write> {
    config: SwapConfig,
    engine: QuoteEngine,
    tokens: TokenList,
    from_edits: Debouncer<Side>,
    to_edits: Debouncer<Side>,
    searches: Debouncer<String>,
    submission: OneShotTimer<PendingSwap>,
    out: W,
}

impl<W: Write> SwapForm<W> {
    /// A form with no tokens loaded yet.
    pub fn new(config: SwapConfig, out: W) -> Self {
        Self {
            engine: QuoteEngine::new(&config),
            tokens: TokenList::default(),
            from_edits: Debouncer::new(config.amount_debounce),
            to_edits: Debouncer::new(config.amount_debounce),
            searches: Debouncer::new(config.search_debounce),
            submission: OneShotTimer::new(),
            config,
            out,
        }
    }

    /// The engine behind the form.
    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Consume the form, returning the output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the startup banner.
    pub fn greet(&mut self) -> Result<(), SwapError> {
        view::render_message(&mut self.out, "Loading prices... (type `help` for commands)")?;
        Ok(())
    }

    /// Apply one event.
    pub fn handle(&mut self, event: FormEvent, now: Instant) -> Result<Flow, SwapError> {
        match event {
            FormEvent::Line(line) => self.on_line(&line, now),
            FormEvent::PricesLoaded(result) => {
                self.on_prices(result)?;
                Ok(Flow::Continue)
            }
            FormEvent::Shutdown => Ok(Flow::Exit),
        }
    }

    /// Earliest moment at which `fire_due` has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.from_edits.deadline(),
            self.to_edits.deadline(),
            self.searches.deadline(),
            self.submission.deadline(),
        ])
    }

    /// Run every debounced edit, search and timer that is due at `now`.
    pub fn fire_due(&mut self, now: Instant) -> Result<(), SwapError> {
        for side in [Side::From, Side::To] {
            if let Some(side) = self.edits(side).fire(now) {
                let outcome = self.engine.recompute(side);
                self.present(&outcome)?;
            }
        }

        if let Some(query) = self.searches.fire(now) {
            let matches = self.tokens.search(&query);
            debug!("Search {:?} matched {} tokens", query, matches.len());
            view::render_tokens(&mut self.out, &matches)?;
        }

        if let Some(pending) = self.submission.fire(now) {
            let summary = self.engine.complete_submission(pending);
            debug!("Swap summary: {}", serde_json::to_string(&summary)?);
            view::render_summary(&mut self.out, &summary)?;
            let outcome = self.engine.refresh();
            self.present(&outcome)?;
        }
        Ok(())
    }

    fn on_line(&mut self, line: &str, now: Instant) -> Result<Flow, SwapError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        match line.parse::<FormCommand>() {
            Ok(command) => self.on_command(command, now),
            Err(e) => {
                warn!("Rejected input {:?}: {}", line, e);
                view::render_message(&mut self.out, &format!("{} (type `help` for commands)", e))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn on_command(&mut self, command: FormCommand, now: Instant) -> Result<Flow, SwapError> {
        match command {
            FormCommand::Select(side, symbol) => match self.tokens.find(&symbol).cloned() {
                Some(token) => {
                    let outcome = self.engine.select_token(side, token);
                    self.present(&outcome)?;
                }
                None => {
                    view::render_message(
                        &mut self.out,
                        &format!("Unknown token: {}", symbol.trim().to_uppercase()),
                    )?;
                }
            },
            FormCommand::Amount(side, text) => {
                self.engine.set_amount_text(side, &text);
                if self.edits(side.opposite()).cancel().is_some() {
                    debug!("Dropped pending {} edit", side.opposite());
                }
                self.edits(side).push(side, now);
            }
            FormCommand::Slippage(text) => {
                let outcome = self.engine.set_slippage(&text);
                self.present(&outcome)?;
            }
            FormCommand::Switch => {
                let outcome = self.engine.switch_sides();
                self.present(&outcome)?;
            }
            FormCommand::Max => {
                let balance = balance_text(self.engine.state().from_token.as_ref());
                match self.engine.set_max(&balance) {
                    Some(outcome) => self.present(&outcome)?,
                    None => view::render_message(&mut self.out, "No balance available")?,
                }
            }
            FormCommand::Search(query) => self.searches.push(query, now),
            FormCommand::Tokens => {
                let all: Vec<_> = self.tokens.tokens().iter().collect();
                view::render_tokens(&mut self.out, &all)?;
            }
            FormCommand::Submit => self.submit(now)?,
            FormCommand::Show => {
                let outcome = self.engine.refresh();
                self.present(&outcome)?;
            }
            FormCommand::Help => view::render_message(&mut self.out, HELP)?,
            FormCommand::Quit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn on_prices(&mut self, result: Result<Vec<Value>, SwapError>) -> Result<(), SwapError> {
        match result {
            Ok(rows) => {
                self.tokens = TokenList::from_rows(&rows, &self.config.icon_base);
                info!("{} tokens available", self.tokens.len());
                view::render_message(&mut self.out, &format!("Loaded {} tokens", self.tokens.len()))?;
                let outcome = match self.engine.apply_initial_selection(&self.tokens) {
                    Some(outcome) => outcome,
                    None => self.engine.refresh(),
                };
                self.present(&outcome)
            }
            Err(e) => {
                error!("Failed to load prices: {}", e);
                let outcome = self.engine.mark_prices_unavailable();
                self.present(&outcome)
            }
        }
    }

    fn submit(&mut self, now: Instant) -> Result<(), SwapError> {
        for side in [Side::From, Side::To] {
            if let Some(side) = self.edits(side).cancel() {
                self.engine.recompute(side);
            }
        }
        match self.engine.begin_submission() {
            Ok(pending) => {
                if let Err(pending) = self.submission.arm(pending, now, self.config.submit_delay) {
                    error!(
                        "Submission timer already armed, dropping swap of {} {}",
                        pending.from_amount, pending.from_symbol
                    );
                }
                let outcome = self.engine.refresh();
                self.present(&outcome)
            }
            Err(reason) => {
                debug!("Submit refused: {}", reason);
                view::render_message(&mut self.out, &format!("! {}", reason))?;
                Ok(())
            }
        }
    }

    fn edits(&mut self, side: Side) -> &mut Debouncer<Side> {
        match side {
            Side::From => &mut self.from_edits,
            Side::To => &mut self.to_edits,
        }
    }

    fn present(&mut self, outcome: &QuoteOutcome) -> Result<(), SwapError> {
        view::render_form(&mut self.out, self.engine.state(), outcome)?;
        Ok(())
    }
}

/// Drive `form` until shutdown or until the event channel closes.
pub fn run_event_loop<W: Write>(form: &mut SwapForm<W>, events: Receiver<FormEvent>) -> Result<(), SwapError> {
    loop {
        let timer = match form.next_deadline() {
            Some(deadline) => at(deadline),
            None => never(),
        };
        select! {
            recv(events) -> msg => match msg {
                Ok(event) => {
                    if form.handle(event, Instant::now())? == Flow::Exit {
                        info!("Form closing");
                        return Ok(());
                    }
                }
                Err(e) => return Err(SwapError::ChannelRecv(e.to_string())),
            },
            recv(timer) -> _ => form.fire_due(Instant::now())?,
        }
    }
}

//! Swap Client: an interactive terminal swap form.
//!
//! Fetches token prices once at startup, lets the user pick a "from" and a
//! "to" token, quotes the exchange as amounts are edited on either side, and
//! simulates submitting the swap.
//!
//! Usage example (CLI):
//! ```bash
//! swap_client --prices-file ./prices.json --default-slippage 1
//! ```
//!
//! Then type commands such as `from eth`, `to usdc`, `amount 1.5`, `submit`.
//! Every flag can also be set through a `SWAP_*` environment variable or a
//! `.env` file; see `args` for details.
#![warn(missing_docs)]
mod args;
mod command;
mod form;
mod input;
mod price_source;
mod view;

use std::io;

use clap::Parser;
use crossbeam_channel::unbounded;
use log::info;
use swap_common::Result;
use swap_common::SwapError;
use swap_common::prices::{FilePriceSource, PriceSource};

use crate::args::Args;
use crate::form::{FormEvent, SwapForm, run_event_loop};
use crate::input::spawn_stdin_reader;
use crate::price_source::{HttpPriceSource, spawn_price_fetch};

fn main() -> Result<(), SwapError> {
    dotenvy::dotenv().ok();
    init_logger();
    let args = Args::parse();
    let config = args.to_config()?;

    let (event_tx, event_rx) = unbounded::<FormEvent>();
    {
        let event_tx = event_tx.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down form...");
            let _ = event_tx.send(FormEvent::Shutdown);
        })
        .map_err(|e| SwapError::Io(io::Error::other(e)))?;
    }

    let source: Box<dyn PriceSource> = match args.prices_path() {
        Some(path) => {
            info!("Reading prices from {}", path.display());
            Box::new(FilePriceSource::new(path))
        }
        None => {
            info!("Fetching prices from {}", config.prices_url);
            Box::new(HttpPriceSource::new(&config.prices_url, args.http_timeout())?)
        }
    };
    spawn_price_fetch(source, event_tx.clone());
    spawn_stdin_reader(event_tx);

    let mut form = SwapForm::new(config, io::stdout());
    form.greet()?;
    run_event_loop(&mut form, event_rx)?;
    info!("Form closed ({} phase)", form.engine().phase());
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

//! User commands read from stdin.
//!
//! One command per line: a case-insensitive keyword followed by an optional
//! argument, e.g. `from eth`, `amount 1,250.5`, `slippage 1`.
use std::str::FromStr;

use strum_macros::{Display, EnumString};
use swap_common::{Side, SwapError};

/// Text printed by `help`.
pub const HELP: &str = "\
Commands:
  from <SYM>        pick the token to sell
  to <SYM>          pick the token to buy
  amount <n>        edit the from amount (alias: in)
  out <n>           edit the to amount
  slippage <pct>    set slippage tolerance (0-5, default 0.5)
  switch            swap sides
  max               use the full balance as the from amount
  search [query]    list tokens whose symbol contains the query
  tokens            list all tokens
  submit            submit the swap
  show              print the form
  help              print this text
  quit              exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Keyword {
    From,
    To,
    #[strum(serialize = "amount", serialize = "in")]
    Amount,
    Out,
    Slippage,
    Switch,
    Max,
    Search,
    Tokens,
    Submit,
    Show,
    Help,
    #[strum(serialize = "quit", serialize = "exit")]
    Quit,
}

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// Pick a token symbol for a side.
    Select(Side, String),
    /// Edit the amount text of a side.
    Amount(Side, String),
    /// Edit the slippage text.
    Slippage(String),
    /// Swap sides.
    Switch,
    /// Max-amount shortcut.
    Max,
    /// Filter the token list.
    Search(String),
    /// List all tokens.
    Tokens,
    /// Submit the swap.
    Submit,
    /// Re-render the form.
    Show,
    /// Print usage.
    Help,
    /// Exit.
    Quit,
}

impl FromStr for FormCommand {
    type Err = SwapError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let keyword = word
            .parse::<Keyword>()
            .map_err(|_| SwapError::InvalidCommand(format!("unknown command `{}`", word)))?;

        let command = match keyword {
            Keyword::From | Keyword::To => {
                if rest.is_empty() {
                    return Err(SwapError::InvalidCommand(format!(
                        "`{}` needs a token symbol",
                        keyword
                    )));
                }
                let side = if keyword == Keyword::From { Side::From } else { Side::To };
                FormCommand::Select(side, rest.to_string())
            }
            Keyword::Amount => FormCommand::Amount(Side::From, rest.to_string()),
            Keyword::Out => FormCommand::Amount(Side::To, rest.to_string()),
            Keyword::Slippage => FormCommand::Slippage(rest.to_string()),
            Keyword::Switch => FormCommand::Switch,
            Keyword::Max => FormCommand::Max,
            Keyword::Search => FormCommand::Search(rest.to_string()),
            Keyword::Tokens => FormCommand::Tokens,
            Keyword::Submit => FormCommand::Submit,
            Keyword::Show => FormCommand::Show,
            Keyword::Help => FormCommand::Help,
            Keyword::Quit => FormCommand::Quit,
        };
        Ok(command)
    }
}

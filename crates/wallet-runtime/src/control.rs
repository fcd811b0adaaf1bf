//! # Operator Console
//!
//! Line-oriented commands read from stdin:
//!
//! ```text
//! wallets btc,eth,brd   replace the desired set
//! rescan                show the rescan confirmation prompt
//! rescan brd            resync the manager behind a currency
//! status                log every manager
//! quit                  shut the runtime down
//! ```

use thiserror::Error;

use shared_types::{CurrencyId, DesiredSet};

/// Console parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// Unrecognised verb.
    #[error("Unknown command {0:?} (try: wallets, rescan, status, quit)")]
    UnknownCommand(String),
}

/// One console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    /// Replace the desired set. An empty list disables every wallet.
    Wallets(DesiredSet),
    /// Ask the user to confirm a rescan.
    RescanPrompt,
    /// Rescan a currency.
    Rescan(CurrencyId),
    /// Log the engine snapshot.
    Status,
    /// Shut down.
    Quit,
}

impl ControlCommand {
    /// Parse a console line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ControlError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        let command = match verb.to_ascii_lowercase().as_str() {
            "wallets" => ControlCommand::Wallets(
                rest.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .collect(),
            ),
            "rescan" if rest.is_empty() => ControlCommand::RescanPrompt,
            "rescan" => ControlCommand::Rescan(CurrencyId::new(rest)),
            "status" => ControlCommand::Status,
            "quit" | "exit" => ControlCommand::Quit,
            _ => return Err(ControlError::UnknownCommand(verb.to_string())),
        };
        Ok(Some(command))
    }
}

mod admin;
mod config_cmd;
mod entries;
mod remote;
mod respond;

use clap::ValueEnum;

pub use admin::AdminCommand;
pub use config_cmd::ConfigCommand;
pub use entries::{DeleteCommand, ExportCommand, ListCommand, SummaryCommand, UndoCommand};
pub use remote::RemoteCommand;
pub use respond::{CheckCommand, EditCommand, SubmitCommand};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Converts a 1-based list position to an index.
fn position(index: usize) -> Result<usize, String> {
    index
        .checked_sub(1)
        .ok_or_else(|| "Positions start at 1".to_string())
}

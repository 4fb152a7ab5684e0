use clap::{Args, Subcommand};
use uuid::Uuid;

use wedding_rsvp::{KeyValueStore, RsvpBook, SyncGateway};

use super::admin::require_admin;

#[derive(Args)]
pub struct RemoteCommand {
    #[command(subcommand)]
    pub command: RemoteSubcommand,
}

#[derive(Subcommand)]
pub enum RemoteSubcommand {
    /// Show the responses stored in the spreadsheet
    List,

    /// Remove a response from the spreadsheet by entry ID
    Delete {
        /// Entry ID (UUID)
        id: String,
    },
}

impl RemoteCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        book: &RsvpBook<S>,
        gateway: &SyncGateway,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_admin(book)?;

        match &self.command {
            RemoteSubcommand::List => {
                let reply = gateway.list().await?;
                println!("{}", serde_json::to_string_pretty(&reply)?);
                Ok(())
            }

            RemoteSubcommand::Delete { id } => {
                let id = Uuid::parse_str(id).map_err(|_| format!("Invalid entry ID: {}", id))?;
                gateway.delete(id).await?;
                println!("Deleted remote row for {}", id);
                Ok(())
            }
        }
    }
}

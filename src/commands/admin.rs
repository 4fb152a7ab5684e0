use clap::{Args, Subcommand};

use wedding_rsvp::config::Config;
use wedding_rsvp::{KeyValueStore, RsvpBook};

#[derive(Args)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand)]
pub enum AdminSubcommand {
    /// Turn on admin mode on this device
    Unlock {
        /// Admin code
        code: String,
    },

    /// Turn off admin mode on this device
    Lock,

    /// Show whether admin mode is on
    Status,
}

impl AdminCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        book: &RsvpBook<S>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AdminSubcommand::Unlock { code } => {
                let expected = config
                    .admin_code
                    .value
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .ok_or("No admin code configured (set admin_code or RSVP_ADMIN_CODE)")?;

                if code.trim() != expected {
                    tracing::warn!("Admin unlock attempted with a wrong code");
                    return Err("Wrong admin code".into());
                }

                book.cache().set_admin_mode(true)?;
                println!("Admin mode on");
                Ok(())
            }

            AdminSubcommand::Lock => {
                book.cache().set_admin_mode(false)?;
                println!("Admin mode off");
                Ok(())
            }

            AdminSubcommand::Status => {
                if book.cache().admin_mode() {
                    println!("Admin mode: on");
                } else {
                    println!("Admin mode: off");
                }
                Ok(())
            }
        }
    }
}

/// Fails unless admin mode was unlocked on this device.
pub fn require_admin<S: KeyValueStore>(
    book: &RsvpBook<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    if book.cache().admin_mode() {
        Ok(())
    } else {
        Err("Admin mode is locked. Run `rsvp admin unlock <code>` first".into())
    }
}

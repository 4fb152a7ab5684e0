use clap::{Args, Subcommand};

use wedding_rsvp::config::Config;

use super::OutputFormat;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        // Secrets are only reported as set or unset
                        println!("admin_code: {}", set_or_unset(config.admin_code.value.is_some()));
                        println!("  source: {}", config.admin_code.source);
                        println!();

                        let sync = &config.sync;
                        println!("sync.mode: {}", sync.mode);
                        println!(
                            "sync.relay_url: {}",
                            sync.relay_url.as_deref().unwrap_or("(none)")
                        );
                        println!(
                            "sync.backend_url: {}",
                            sync.backend_url.as_deref().unwrap_or("(none)")
                        );
                        println!("sync.secret: {}", set_or_unset(sync.secret.is_some()));
                        if !sync.is_configured() {
                            println!("\nNo endpoint for {} mode; responses stay on this device.", sync.mode);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn set_or_unset(present: bool) -> &'static str {
    if present {
        "(set)"
    } else {
        "(unset)"
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{
    AdminCommand, CheckCommand, ConfigCommand, DeleteCommand, EditCommand, ExportCommand,
    ListCommand, RemoteCommand, SubmitCommand, SummaryCommand, UndoCommand,
};
use wedding_rsvp::config::Config;
use wedding_rsvp::{FileStore, RsvpBook, SyncGateway};

#[derive(Parser)]
#[command(name = "rsvp")]
#[command(version)]
#[command(about = "Collect and manage wedding RSVPs", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a response
    Submit(SubmitCommand),

    /// Change a stored response (admin)
    Edit(EditCommand),

    /// Check whether meal counts add up
    Check(CheckCommand),

    /// List stored responses (admin)
    List(ListCommand),

    /// Show headcount totals (admin)
    Summary(SummaryCommand),

    /// Delete a stored response (admin)
    Delete(DeleteCommand),

    /// Restore the last deleted response (admin)
    Undo(UndoCommand),

    /// Export responses to CSV (admin)
    Export(ExportCommand),

    /// Work with the spreadsheet directly (admin)
    Remote(RemoteCommand),

    /// Lock or unlock admin mode
    Admin(AdminCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    let Some(command) = cli.command else {
        println!("Use --help to see available commands");
        return Ok(());
    };

    let mut book = RsvpBook::open(FileStore::new(config.data_dir.value.clone()));
    let gateway = SyncGateway::from_config(&config.sync);

    match command {
        Commands::Submit(cmd) => cmd.run(&mut book, &gateway).await?,
        Commands::Edit(cmd) => cmd.run(&mut book, &gateway).await?,
        Commands::Check(cmd) => cmd.run()?,
        Commands::List(cmd) => cmd.run(&book)?,
        Commands::Summary(cmd) => cmd.run(&book)?,
        Commands::Delete(cmd) => cmd.run(&mut book)?,
        Commands::Undo(cmd) => cmd.run(&mut book)?,
        Commands::Export(cmd) => cmd.run(&book)?,
        Commands::Remote(cmd) => cmd.run(&book, &gateway).await?,
        Commands::Admin(cmd) => cmd.run(&book, &config)?,
        Commands::Config(cmd) => cmd.run(&config)?,
    }

    Ok(())
}

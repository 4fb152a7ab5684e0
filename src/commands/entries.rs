use chrono::Local;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use wedding_rsvp::export::{export_filename, write_csv};
use wedding_rsvp::{KeyValueStore, RsvpBook};

use super::admin::require_admin;
use super::{position, OutputFormat};

/// List every stored response, newest first
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        book: &RsvpBook<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_admin(book)?;

        if book.is_empty() {
            println!("No responses yet");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(book.entries())?);
            }
            OutputFormat::Text => {
                println!(
                    "{:>3}  {:<19}  {:<20}  {:<5}  {:<5}  {:>5}  MEALS",
                    "#", "TIME", "NAME", "SIDE", "RSVP", "COUNT"
                );
                println!("{}", "-".repeat(80));
                for (i, entry) in book.entries().iter().enumerate() {
                    let name = if entry.name.chars().count() > 20 {
                        format!("{}...", entry.name.chars().take(17).collect::<String>())
                    } else {
                        entry.name.clone()
                    };
                    println!(
                        "{:>3}  {:<19}  {:<20}  {:<5}  {:<5}  {:>5}  {} ({} meat / {} veg)",
                        i + 1,
                        entry.created_at_local(),
                        name,
                        entry.side,
                        entry.attending,
                        entry.total,
                        entry.meal_pref,
                        entry.meat_count,
                        entry.veg_count
                    );
                }
                println!("\nTotal: {} response(s)", book.len());
            }
        }
        Ok(())
    }
}

/// Show headcount totals
#[derive(Args)]
pub struct SummaryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SummaryCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        book: &RsvpBook<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_admin(book)?;

        let summary = book.summary();
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Text => println!("{}", summary),
        }
        Ok(())
    }
}

/// Delete a response (can be undone once)
#[derive(Args)]
pub struct DeleteCommand {
    /// Position in `rsvp list` (1-based)
    pub index: usize,

    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

impl DeleteCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        book: &mut RsvpBook<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_admin(book)?;

        let name = book.request_delete(position(self.index)?)?.name.clone();

        if !self.yes {
            print!("Delete response from '{}'? [y/N] ", name);
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                book.cancel_delete();
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        if let Some(removed) = book.confirm_delete()? {
            println!("Deleted response from {}", removed.name);
            println!("Run `rsvp undo` to restore it.");
        }
        Ok(())
    }
}

/// Restore the most recently deleted response
#[derive(Args)]
pub struct UndoCommand;

impl UndoCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        book: &mut RsvpBook<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_admin(book)?;

        match book.undo_delete()? {
            Some(entry) => println!("Restored response from {}", entry.name),
            None => println!("Nothing to undo"),
        }
        Ok(())
    }
}

/// Export all responses to a CSV file
#[derive(Args)]
pub struct ExportCommand {
    /// Output path (defaults to wedding-rsvp_<date>.csv in the current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        book: &RsvpBook<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_admin(book)?;

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(export_filename(Local::now().date_naive())));

        write_csv(&path, book.entries())?;
        println!("Exported {} response(s) to {}", book.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wedding_rsvp::{MemoryStore, RsvpForm, SubmitMode, SyncGateway};

    async fn book_with(names: &[&str]) -> RsvpBook<MemoryStore> {
        let gateway = SyncGateway::new(SubmitMode::Relay, None, "s");
        let mut book = RsvpBook::open(MemoryStore::new());
        for name in names {
            let form = RsvpForm {
                name: name.to_string(),
                ..RsvpForm::default()
            };
            book.submit(&form, &gateway).await.unwrap();
        }
        book.cache().set_admin_mode(true).unwrap();
        book
    }

    #[tokio::test]
    async fn test_admin_commands_locked() {
        let mut book = book_with(&["Tom"]).await;
        book.cache().set_admin_mode(false).unwrap();

        assert!(ListCommand {
            format: OutputFormat::Text
        }
        .run(&book)
        .is_err());
        assert!(SummaryCommand {
            format: OutputFormat::Json
        }
        .run(&book)
        .is_err());
        assert!(DeleteCommand { index: 1, yes: true }.run(&mut book).is_err());
        assert!(UndoCommand.run(&mut book).is_err());
        assert_eq!(book.len(), 1);
    }

    #[tokio::test]
    async fn test_list_and_summary() {
        let book = book_with(&["Tom", "Amy"]).await;

        ListCommand {
            format: OutputFormat::Text,
        }
        .run(&book)
        .unwrap();
        SummaryCommand {
            format: OutputFormat::Json,
        }
        .run(&book)
        .unwrap();
    }

    #[tokio::test]
    async fn test_delete_then_undo() {
        let mut book = book_with(&["Tom", "Amy"]).await;

        // Newest first: position 1 is Amy
        DeleteCommand { index: 1, yes: true }.run(&mut book).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.entries()[0].name, "Tom");

        UndoCommand.run(&mut book).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.entries()[0].name, "Amy");

        UndoCommand.run(&mut book).unwrap();
        assert_eq!(book.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_bad_position() {
        let mut book = book_with(&["Tom"]).await;

        assert!(DeleteCommand { index: 0, yes: true }.run(&mut book).is_err());
        assert!(DeleteCommand { index: 2, yes: true }.run(&mut book).is_err());
        assert_eq!(book.len(), 1);
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("guests.csv");
        let book = book_with(&["Tom", "Amy"]).await;

        ExportCommand {
            output: Some(path.clone()),
        }
        .run(&book)
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_export_refuses_empty() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("guests.csv");
        let book = book_with(&[]).await;

        let result = ExportCommand {
            output: Some(path.clone()),
        }
        .run(&book);

        assert!(result.is_err());
        assert!(!path.exists());
    }
}

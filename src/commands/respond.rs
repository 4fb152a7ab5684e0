use clap::Args;

use wedding_rsvp::notice::NoticeKind;
use wedding_rsvp::{to_int, KeyValueStore, RsvpBook, RsvpForm, SubmitReport, SyncGateway};

use super::admin::require_admin;
use super::position;

/// Form fields shared by `submit` and `edit`.
///
/// Values are taken as typed; validation happens on submission.
#[derive(Args, Default)]
pub struct FormArgs {
    /// Guest name
    #[arg(long)]
    pub name: Option<String>,

    /// Which side the guest belongs to (groom, bride)
    #[arg(long)]
    pub side: Option<String>,

    /// Attendance (yes, no, maybe)
    #[arg(long)]
    pub attending: Option<String>,

    /// Party size
    #[arg(long)]
    pub total: Option<String>,

    /// Meal preference (meat, veg, mixed)
    #[arg(long = "meal")]
    pub meal_pref: Option<String>,

    /// Meat meals (for a mixed party)
    #[arg(long = "meat")]
    pub meat_count: Option<String>,

    /// Vegetarian meals (for a mixed party)
    #[arg(long = "veg")]
    pub veg_count: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl FormArgs {
    /// Applies the given fields in the order a guest would fill them in, so
    /// a new meal choice or party size auto-fills the meal counts before
    /// explicit counts override them.
    pub fn apply(&self, form: &mut RsvpForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(side) = &self.side {
            form.side = side.clone();
        }
        if let Some(attending) = &self.attending {
            form.attending = attending.clone();
        }
        if let Some(meal_pref) = &self.meal_pref {
            form.set_meal_pref(meal_pref);
        }
        if let Some(total) = &self.total {
            form.set_total(total);
        }
        if let Some(meat) = &self.meat_count {
            form.meat_count = meat.clone();
        }
        if let Some(veg) = &self.veg_count {
            form.veg_count = veg.clone();
        }
        if let Some(phone) = &self.phone {
            form.phone = phone.clone();
        }
        if let Some(notes) = &self.notes {
            form.notes = notes.clone();
        }
    }
}

#[derive(Args)]
pub struct SubmitCommand {
    #[command(flatten)]
    pub form: FormArgs,
}

impl SubmitCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        book: &mut RsvpBook<S>,
        gateway: &SyncGateway,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut form = RsvpForm::default();
        self.form.apply(&mut form);

        let report = book.submit(&form, gateway).await?;
        print_report(&report);
        Ok(())
    }
}

#[derive(Args)]
pub struct EditCommand {
    /// Position in `rsvp list` (1-based)
    pub index: usize,

    #[command(flatten)]
    pub form: FormArgs,
}

impl EditCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        book: &mut RsvpBook<S>,
        gateway: &SyncGateway,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_admin(book)?;

        let mut form = book.begin_edit(position(self.index)?)?;
        self.form.apply(&mut form);

        let report = book.submit(&form, gateway).await?;
        print_report(&report);
        Ok(())
    }
}

/// Checks a set of meal counts the way the form does while typing.
#[derive(Args)]
pub struct CheckCommand {
    /// Attendance (yes, no, maybe)
    pub attending: String,

    /// Meal preference (meat, veg, mixed)
    pub meal: String,

    /// Party size
    pub total: String,

    /// Meat meals
    pub meat: String,

    /// Vegetarian meals
    pub veg: String,
}

impl CheckCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let valid = wedding_rsvp::meal_counts_valid(
            self.attending.trim(),
            self.meal.trim(),
            to_int(&self.total, 0),
            to_int(&self.meat, 0),
            to_int(&self.veg, 0),
        );

        if valid {
            println!("ok");
            Ok(())
        } else {
            Err("Meat and vegetarian counts must add up to the party size".into())
        }
    }
}

fn print_report(report: &SubmitReport) {
    if let Some(warning) = &report.warning {
        eprintln!("{}", prefixed(warning.kind, &warning.message));
    }
    println!("{}", report.notice);
    println!();
    println!("{}", report.entry);
    if report.replaced {
        println!("(updated existing response)");
    }
}

fn prefixed(kind: NoticeKind, message: &str) -> String {
    match kind {
        NoticeKind::Warning => format!("Warning: {}", message),
        _ => message.to_string(),
    }
}

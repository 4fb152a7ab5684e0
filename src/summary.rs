//! Headcount totals for the admin view.

use serde::Serialize;
use std::fmt;

use crate::models::{Attendance, Entry, Side};

/// Totals derived from the current entry list.
///
/// Always recomputed from the list; never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_yes: u64,
    pub total_no: u64,
    pub total_maybe: u64,
    pub meat: u64,
    pub veg: u64,
    pub groom: u64,
    pub bride: u64,
}

impl Summary {
    pub fn from_entries(entries: &[Entry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            let total = u64::from(entry.total);
            match entry.attending {
                Attendance::Yes => acc.total_yes += total,
                Attendance::No => acc.total_no += total,
                Attendance::Maybe => acc.total_maybe += total,
            }
            acc.meat += u64::from(entry.meat_count);
            acc.veg += u64::from(entry.veg_count);
            match entry.side {
                Side::Groom => acc.groom += total,
                Side::Bride => acc.bride += total,
            }
            acc
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Attending:     {}", self.total_yes)?;
        writeln!(f, "Not attending: {}", self.total_no)?;
        writeln!(f, "Maybe:         {}", self.total_maybe)?;
        writeln!(f, "Meat meals:    {}", self.meat)?;
        writeln!(f, "Veg meals:     {}", self.veg)?;
        writeln!(f, "Groom side:    {}", self.groom)?;
        write!(f, "Bride side:    {}", self.bride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealPref;

    #[test]
    fn test_empty_summary() {
        assert_eq!(Summary::from_entries(&[]), Summary::default());
    }

    #[test]
    fn test_summary_totals() {
        let entries = vec![
            Entry::new("Tom", Side::Groom, Attendance::Yes).with_party(2, MealPref::Meat, 2, 0),
            Entry::new("Amy", Side::Bride, Attendance::Yes).with_party(3, MealPref::Mixed, 1, 2),
            Entry::new("Bob", Side::Bride, Attendance::No).with_party(1, MealPref::Meat, 0, 0),
            Entry::new("Eve", Side::Groom, Attendance::Maybe).with_party(4, MealPref::Veg, 0, 0),
        ];

        let summary = Summary::from_entries(&entries);
        assert_eq!(summary.total_yes, 5);
        assert_eq!(summary.total_no, 1);
        assert_eq!(summary.total_maybe, 4);
        assert_eq!(summary.meat, 3);
        assert_eq!(summary.veg, 2);
        assert_eq!(summary.groom, 6);
        assert_eq!(summary.bride, 4);
    }
}

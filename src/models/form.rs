use serde::{Deserialize, Serialize};

use super::entry::Entry;
use crate::validation::to_int;

/// Raw form state as typed by the guest.
///
/// Choices and counts stay as text until submission so the validation engine
/// decides how to coerce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsvpForm {
    pub name: String,
    pub side: String,
    pub attending: String,
    pub total: String,
    pub meal_pref: String,
    pub meat_count: String,
    pub veg_count: String,
    pub phone: String,
    pub notes: String,
}

impl Default for RsvpForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            side: "groom".to_string(),
            attending: "yes".to_string(),
            total: "1".to_string(),
            meal_pref: "meat".to_string(),
            meat_count: "1".to_string(),
            veg_count: "0".to_string(),
            phone: String::new(),
            notes: String::new(),
        }
    }
}

impl RsvpForm {
    /// Pre-fills the form with a stored entry for editing.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            side: entry.side.to_string(),
            attending: entry.attending.to_string(),
            total: entry.total.to_string(),
            meal_pref: entry.meal_pref.to_string(),
            meat_count: entry.meat_count.to_string(),
            veg_count: entry.veg_count.to_string(),
            phone: entry.phone.clone(),
            notes: entry.notes.clone(),
        }
    }

    /// Sets the party size.
    ///
    /// An attending guest with a single-kind meal preference gets the meal
    /// counts filled in to match.
    pub fn set_total(&mut self, value: &str) {
        let n = to_int(value, 0);
        self.total = n.to_string();

        if self.attending.trim() != "yes" {
            return;
        }
        match self.meal_pref.trim() {
            "meat" => {
                self.meat_count = n.to_string();
                self.veg_count = "0".to_string();
            }
            "veg" => {
                self.meat_count = "0".to_string();
                self.veg_count = n.to_string();
            }
            _ => {}
        }
    }

    /// Sets the meal preference.
    ///
    /// Picking meat or veg moves the whole party onto that meal; mixed keeps
    /// the current counts for the guest to split.
    pub fn set_meal_pref(&mut self, value: &str) {
        self.meal_pref = value.trim().to_string();
        match self.meal_pref.as_str() {
            "meat" => {
                self.meat_count = self.total.clone();
                self.veg_count = "0".to_string();
            }
            "veg" => {
                self.meat_count = "0".to_string();
                self.veg_count = self.total.clone();
            }
            _ => {}
        }
    }

    /// Live feedback for the meal counts, evaluated on every change.
    pub fn meal_counts_valid(&self) -> bool {
        crate::validation::meal_counts_valid(
            self.attending.trim(),
            self.meal_pref.trim(),
            to_int(&self.total, 0),
            to_int(&self.meat_count, 0),
            to_int(&self.veg_count, 0),
        )
    }
}

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::attendance::Attendance;
use super::meal_pref::MealPref;
use super::side::Side;

/// One guest's RSVP response.
///
/// Serialized with camelCase keys since the same shape is posted to the
/// spreadsheet backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub side: Side,
    pub attending: Attendance,
    pub total: u32,
    pub meal_pref: MealPref,
    pub meat_count: u32,
    pub veg_count: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(name: impl Into<String>, side: Side, attending: Attendance) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            side,
            attending,
            total: 0,
            meal_pref: MealPref::default(),
            meat_count: 0,
            veg_count: 0,
            phone: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_party(mut self, total: u32, meal_pref: MealPref, meat: u32, veg: u32) -> Self {
        self.total = total;
        self.meal_pref = meal_pref;
        self.meat_count = meat;
        self.veg_count = veg;
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Creation time rendered in the local timezone, as shown in listings and exports.
    pub fn created_at_local(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) x{}",
            self.name, self.side, self.attending, self.total
        )?;
        if self.attending.is_attending() {
            write!(
                f,
                " meal: {} [meat {} / veg {}]",
                self.meal_pref, self.meat_count, self.veg_count
            )?;
        }
        Ok(())
    }
}

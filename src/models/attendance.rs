use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the guest will attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    #[default]
    Yes,
    No,
    Maybe,
}

impl Attendance {
    pub fn is_attending(&self) -> bool {
        matches!(self, Attendance::Yes)
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attendance::Yes => write!(f, "yes"),
            Attendance::No => write!(f, "no"),
            Attendance::Maybe => write!(f, "maybe"),
        }
    }
}

impl FromStr for Attendance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Attendance::Yes),
            "no" => Ok(Attendance::No),
            "maybe" => Ok(Attendance::Maybe),
            _ => Err(format!(
                "Invalid attendance '{}'. Valid options: yes, no, maybe",
                s
            )),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which family the guest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Groom,
    Bride,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Groom => write!(f, "groom"),
            Side::Bride => write!(f, "bride"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groom" => Ok(Side::Groom),
            "bride" => Ok(Side::Bride),
            _ => Err(format!(
                "Invalid side '{}'. Valid options: groom, bride",
                s
            )),
        }
    }
}

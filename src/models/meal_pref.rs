use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealPref {
    #[default]
    Meat,
    Veg,
    Mixed,
}

impl fmt::Display for MealPref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealPref::Meat => write!(f, "meat"),
            MealPref::Veg => write!(f, "veg"),
            MealPref::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for MealPref {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "meat" => Ok(MealPref::Meat),
            "veg" => Ok(MealPref::Veg),
            "mixed" => Ok(MealPref::Mixed),
            _ => Err(format!(
                "Invalid meal preference '{}'. Valid options: meat, veg, mixed",
                s
            )),
        }
    }
}

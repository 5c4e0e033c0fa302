//! Department enum for the closed set of company departments.
//!
//! Serde values are the Danish department slugs the product has always
//! persisted; variant names are English.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Department a suggestion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "salg")]
    Sales,
    #[serde(rename = "marketing")]
    Marketing,
    #[serde(rename = "indkøb")]
    Purchasing,
    #[serde(rename = "design")]
    Design,
    #[serde(rename = "lager")]
    Warehouse,
}

impl Department {
    /// All departments, in the order the submission form lists them.
    pub const ALL: [Department; 5] = [
        Department::Sales,
        Department::Marketing,
        Department::Purchasing,
        Department::Design,
        Department::Warehouse,
    ];

    /// Returns the persisted slug for this department.
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Sales => "salg",
            Department::Marketing => "marketing",
            Department::Purchasing => "indkøb",
            Department::Design => "design",
            Department::Warehouse => "lager",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Department {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "salg" => Ok(Department::Sales),
            "marketing" => Ok(Department::Marketing),
            "indkøb" => Ok(Department::Purchasing),
            "design" => Ok(Department::Design),
            "lager" => Ok(Department::Warehouse),
            other => Err(ValidationError::invalid_format(
                "department",
                format!("unknown department '{}'", other),
            )),
        }
    }
}

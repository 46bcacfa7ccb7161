//! Sorting types for document listings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order applied to an aggregated document set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSort {
    /// File name, A→Z.
    NameAsc,
    /// File name, Z→A.
    NameDesc,
    /// Creation date, oldest first.
    CreatedAsc,
    /// Creation date, newest first.
    CreatedDesc,
    /// Grouped by file class, then name A→Z within each group.
    ClassGrouped,
}

impl Default for DocumentSort {
    fn default() -> Self {
        Self::NameAsc
    }
}

impl FromStr for DocumentSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name_asc" => Ok(Self::NameAsc),
            "name_desc" => Ok(Self::NameDesc),
            "created_asc" => Ok(Self::CreatedAsc),
            "created_desc" => Ok(Self::CreatedDesc),
            "class_grouped" => Ok(Self::ClassGrouped),
            _ => Err(format!("Unknown sort order: {s}")),
        }
    }
}

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Ordering applied to the operators inside each op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum SortOption {
    /// Last name, then first name.
    #[default]
    #[serde(rename = "lastName")]
    #[value(name = "name")]
    Name,
    /// Most completed ops first.
    #[serde(rename = "opsCompleted")]
    #[value(name = "ops")]
    Ops,
    /// Most reliable first.
    #[serde(rename = "reliability")]
    #[value(name = "reliability")]
    Reliability,
}

impl SortOption {
    /// Parse either the wire key (`lastName`) or the short CLI name (`name`).
    /// Unknown keys yield `None`, which callers treat as "keep roster order".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "lastName" | "name" => Some(SortOption::Name),
            "opsCompleted" | "ops" => Some(SortOption::Ops),
            "reliability" => Some(SortOption::Reliability),
            _ => None,
        }
    }
}

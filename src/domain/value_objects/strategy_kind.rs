//! # Allocation Strategy Selector
//!
//! Closed enumeration of the supported batch consumption policies.
//!
//! Two resolution paths exist, for two kinds of caller:
//!
//! - [`StrategyKind::from_key`] is lenient: unknown keys resolve to the
//!   documented default, [`StrategyKind::OldestFirst`]. This preserves the
//!   behavior of configuration keys that predate the closed enum.
//! - The [`FromStr`] impl is strict and fails on unknown input, for
//!   callers that want a configuration error instead of a silent default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned by strict enum parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {0} value: '{1}'")]
pub struct ParseEnumError(pub &'static str, pub String);

/// Batch consumption policy selector.
///
/// # Examples
///
/// ```
/// use stockroom::domain::value_objects::StrategyKind;
///
/// assert_eq!(StrategyKind::from_key("NEWEST_FIRST"), StrategyKind::NewestFirst);
/// // Unknown keys fall back to the documented default.
/// assert_eq!(StrategyKind::from_key("WAREHOUSE"), StrategyKind::OldestFirst);
/// // Strict parsing rejects them instead.
/// assert!("WAREHOUSE".parse::<StrategyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    /// Consume earliest-expiring batches first (FEFO). The default.
    #[default]
    OldestFirst,
    /// Consume latest-expiring batches first.
    NewestFirst,
}

impl StrategyKind {
    /// Resolves a configuration key, falling back to the default on
    /// unrecognized input.
    ///
    /// Accepted spellings: `OLDEST_FIRST` / `FEFO` / `FIFO` and
    /// `NEWEST_FIRST` / `LIFO`, case-insensitive.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OldestFirst => write!(f, "OLDEST_FIRST"),
            Self::NewestFirst => write!(f, "NEWEST_FIRST"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "OLDEST_FIRST" | "FEFO" | "FIFO" => Ok(Self::OldestFirst),
            "NEWEST_FIRST" | "LIFO" => Ok(Self::NewestFirst),
            _ => Err(ParseEnumError("StrategyKind", s.to_string())),
        }
    }
}

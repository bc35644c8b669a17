//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Identifier of a history entry. Starts at 1 and only ever grows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(u64);

/// Positional identifier of an asset (its slot in creation order).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetIndex(usize);

impl HistoryId {
    /// The id handed to the very first history entry.
    pub const FIRST: HistoryId = HistoryId(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

macro_rules! impl_integer_newtype {
    ($t:ident, $inner:ty, $name:literal, $err:path) => {
        impl $t {
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$inner> for $t {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$t> for $inner {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<$inner>()
                    .map_err(|e| $err(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_integer_newtype!(HistoryId, u64, "HistoryId", LedgerError::invalid_history_id);
impl_integer_newtype!(AssetIndex, usize, "AssetIndex", LedgerError::invalid_index);

//! `networth-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;
pub mod money;

pub use aggregate::Aggregate;
pub use error::{LedgerError, LedgerResult};
pub use event::Event;
pub use id::{AssetIndex, HistoryId};
pub use money::Money;

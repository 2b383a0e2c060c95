//! Plan model and ingestion.
//!
//! This module handles everything on the plan side of validation:
//! - The normalized [`Action`] vocabulary and its compatibility relation
//! - The subset of the upstream plan schema we consume
//! - Loading plan documents from disk

mod action;
mod reader;
mod types;

pub use action::{Action, are_compatible};
pub use reader::PlanReader;
pub use types::{Change, Plan, ResourceChange, ResourceMode};

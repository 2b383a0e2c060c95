//! Filter module for the plan validator.
//!
//! This module owns the filter artifact end to end:
//! - The [`PlanFilter`] document and its lookup operations
//! - Building a filter by merging plans
//! - Storage backends and strict batch loading

mod builder;
mod local;
mod store;
mod types;

pub use builder::FilterBuilder;
pub use local::LocalFilterStore;
pub use store::{FilterStore, load_filters};
pub use types::{Address, CURRENT_FORMAT_VERSION, PlanFilter};

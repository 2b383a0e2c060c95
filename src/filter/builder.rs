//! Merging plans into a filter.
//!
//! This module walks one or more plan documents and folds their managed
//! resource changes into a single [`PlanFilter`].

use std::collections::HashMap;
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::plan::{Action, Plan};

use super::types::PlanFilter;

/// Engine for building filters from plans.
#[derive(Debug, Default)]
pub struct FilterBuilder;

impl FilterBuilder {
    /// Creates a new filter builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds a filter allowing every action the given plans perform.
    ///
    /// Data sources are ignored, as are no-op and read changes. An action is
    /// recorded once per address even when several plans report it; distinct
    /// actions for the same address accumulate in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if any change has an unrecognized verb sequence or if
    /// an address appears twice in one plan. Nothing is returned on error.
    pub fn build(&self, plans: &[Plan]) -> Result<PlanFilter> {
        let mut filter = PlanFilter::new();

        for (index, plan) in plans.iter().enumerate() {
            let mut seen: HashMap<&str, Action> = HashMap::new();

            for change in plan.managed_changes() {
                let action = change.action();
                if action == Action::Invalid {
                    return Err(PlanError::unrecognized(change.change.actions.as_slice()).into());
                }

                if let Some(first) = seen.get(change.address.as_str()) {
                    return Err(PlanError::DuplicateAddress {
                        address: change.address.clone(),
                        action: *first,
                    }
                    .into());
                }
                seen.insert(change.address.as_str(), action);

                if !action.is_actionable() {
                    continue;
                }

                filter.allow(&change.address, action);
            }

            debug!("Merged plan {index}: {} managed changes", seen.len());
        }

        debug!("Built filter with {} addresses", filter.len());
        Ok(filter)
    }
}

impl PlanFilter {
    /// Builds a filter from plans using the default [`FilterBuilder`].
    ///
    /// # Errors
    ///
    /// See [`FilterBuilder::build`].
    pub fn from_plans(plans: &[Plan]) -> Result<Self> {
        FilterBuilder::new().build(plans)
    }
}

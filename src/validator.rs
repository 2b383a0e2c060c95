//! Plan validation against recorded filters.
//!
//! This module compares the actions a fresh plan would perform with the
//! actions one or more filters allow, and reports every change that no
//! filter permits.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::filter::{FilterBuilder, PlanFilter};
use crate::plan::{Action, Plan};

/// Validator for checking plans against filters.
#[derive(Debug)]
pub struct PlanValidator<'a> {
    /// Filters the plan is checked against.
    filters: &'a [PlanFilter],
    /// Accept actions compatible with a listed one.
    allow_compatible: bool,
    /// Builder used to normalize the checked plan.
    builder: FilterBuilder,
}

/// A change the filters do not permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Address of the resource.
    pub address: String,
    /// Action the plan would perform.
    pub action: Action,
    /// Actions the filters list for this address.
    pub allowed: Vec<Action>,
}

/// Outcome of checking one plan.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Number of (address, action) pairs checked.
    pub checked: usize,
    /// Changes that were not permitted.
    pub violations: Vec<Violation>,
}

impl<'a> PlanValidator<'a> {
    /// Creates a validator over the given filters.
    ///
    /// Compatible actions are accepted by default.
    #[must_use]
    pub const fn new(filters: &'a [PlanFilter]) -> Self {
        Self {
            filters,
            allow_compatible: true,
            builder: FilterBuilder::new(),
        }
    }

    /// Sets whether compatible actions are accepted.
    #[must_use]
    pub const fn with_allow_compatible(mut self, allow_compatible: bool) -> Self {
        self.allow_compatible = allow_compatible;
        self
    }

    /// Checks a plan against the filters.
    ///
    /// A change passes if any filter permits it.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan itself is malformed: an unrecognized
    /// action or a repeated address.
    pub fn validate(&self, plan: &Plan) -> Result<ValidationReport> {
        let proposed = self.builder.build(std::slice::from_ref(plan))?;
        info!(
            "Checking {} addresses against {} filters",
            proposed.len(),
            self.filters.len()
        );

        let mut checked = 0;
        let mut violations = Vec::new();

        for (address, actions) in &proposed.allowed_actions {
            for action in actions {
                checked += 1;
                if self.is_permitted(address.as_str(), *action) {
                    debug!("{address}: {action} permitted");
                    continue;
                }

                let violation = Violation {
                    address: address.to_string(),
                    action: *action,
                    allowed: self.allowed_for(address.as_str()),
                };
                warn!("{violation}");
                violations.push(violation);
            }
        }

        Ok(ValidationReport {
            checked,
            violations,
        })
    }

    /// Returns true if any filter permits `action` for `address`.
    fn is_permitted(&self, address: &str, action: Action) -> bool {
        self.filters
            .iter()
            .any(|filter| filter.permits(address, action, self.allow_compatible))
    }

    /// Union of the actions all filters list for `address`, first-seen order.
    fn allowed_for(&self, address: &str) -> Vec<Action> {
        let mut allowed = Vec::new();
        for action in self.filters.iter().flat_map(|f| f.actions_for(address)) {
            if !allowed.contains(action) {
                allowed.push(*action);
            }
        }
        allowed
    }
}

impl ValidationReport {
    /// Returns true if every change is permitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = self.action.pretty().unwrap_or_else(|| self.action.as_str());
        write!(f, "{} would be {verb}", self.address)?;

        if self.allowed.is_empty() {
            return write!(f, " but the address is not in any filter");
        }

        let allowed: Vec<&str> = self
            .allowed
            .iter()
            .map(|a| a.pretty().unwrap_or_else(|| a.as_str()))
            .collect();
        write!(f, " but may only be {}", allowed.join(" or "))
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            return write!(f, "Plan is permitted ({} changes checked)", self.checked);
        }

        writeln!(
            f,
            "Plan is not permitted ({} of {} changes rejected):",
            self.violations.len(),
            self.checked
        )?;
        for violation in &self.violations {
            writeln!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlanError, ValidatorError};
    use crate::plan::ResourceChange;

    fn plan(changes: &[(&str, &[&str])]) -> Plan {
        Plan {
            format_version: None,
            resource_changes: changes
                .iter()
                .map(|(address, verbs)| ResourceChange::managed(*address, *verbs))
                .collect(),
        }
    }

    fn filter(changes: &[(&str, &[&str])]) -> PlanFilter {
        PlanFilter::from_plans(&[plan(changes)]).expect("filter should build")
    }

    #[test]
    fn test_exact_match_passes() {
        let filters = [filter(&[("a.b.c", &["create"]), ("d.e.f", &["delete"])])];
        let report = PlanValidator::new(&filters)
            .validate(&plan(&[("a.b.c", &["create"]), ("x.y.z", &["no-op"])]))
            .expect("plan should validate");

        assert!(report.is_valid());
        assert_eq!(report.checked, 1);
    }

    #[test]
    fn test_compatible_action_passes_unless_strict() {
        let filters = [filter(&[("a.b.c", &["create"])])];
        let proposed = plan(&[("a.b.c", &["create", "delete"])]);

        let lenient = PlanValidator::new(&filters)
            .validate(&proposed)
            .expect("plan should validate");
        assert!(lenient.is_valid());

        let strict = PlanValidator::new(&filters)
            .with_allow_compatible(false)
            .validate(&proposed)
            .expect("plan should validate");
        assert_eq!(
            strict.violations,
            vec![Violation {
                address: String::from("a.b.c"),
                action: Action::CreateDelete,
                allowed: vec![Action::Create],
            }]
        );
    }

    #[test]
    fn test_incompatible_action_is_rejected() {
        let filters = [filter(&[("a.b.c", &["delete", "create"])])];
        let report = PlanValidator::new(&filters)
            .validate(&plan(&[("a.b.c", &["create", "delete"])]))
            .expect("plan should validate");

        assert!(!report.is_valid());
        assert_eq!(
            report.violations[0].to_string(),
            "a.b.c would be replaced (re-created before deletion) but may only be replaced (deleted then re-created)"
        );
    }

    #[test]
    fn test_unknown_address_is_rejected() {
        let filters = [filter(&[("a.b.c", &["update"])])];
        let report = PlanValidator::new(&filters)
            .validate(&plan(&[("x.y.z", &["delete"])]))
            .expect("plan should validate");

        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].allowed.is_empty());
        assert_eq!(
            report.violations[0].to_string(),
            "x.y.z would be deleted but the address is not in any filter"
        );
    }

    #[test]
    fn test_any_filter_may_permit() {
        let filters = [
            filter(&[("a.b.c", &["update"])]),
            filter(&[("a.b.c", &["delete"]), ("d.e.f", &["create"])]),
        ];
        let report = PlanValidator::new(&filters)
            .with_allow_compatible(false)
            .validate(&plan(&[("a.b.c", &["delete"]), ("d.e.f", &["create"])]))
            .expect("plan should validate");

        assert!(report.is_valid());
        assert_eq!(report.checked, 2);
    }

    #[test]
    fn test_allowed_is_union_across_filters() {
        let filters = [
            filter(&[("a.b.c", &["update"])]),
            filter(&[("a.b.c", &["delete"])]),
            filter(&[("a.b.c", &["update"])]),
        ];
        let report = PlanValidator::new(&filters)
            .validate(&plan(&[("a.b.c", &["create", "delete"])]))
            .expect("plan should validate");

        assert!(report.is_valid());

        let strict = PlanValidator::new(&filters)
            .with_allow_compatible(false)
            .validate(&plan(&[("a.b.c", &["create", "delete"])]))
            .expect("plan should validate");
        assert_eq!(strict.violations[0].allowed, vec![Action::Update, Action::Delete]);
    }

    #[test]
    fn test_malformed_plan_is_an_error() {
        let filters = [PlanFilter::new()];
        let result = PlanValidator::new(&filters).validate(&plan(&[
            ("a.b.c", &["create"]),
            ("a.b.c", &["create"]),
        ]));

        assert!(matches!(
            result,
            Err(ValidatorError::Plan(PlanError::DuplicateAddress { .. }))
        ));
    }

    #[test]
    fn test_report_display() {
        let filters = [PlanFilter::new()];
        let report = PlanValidator::new(&filters)
            .validate(&Plan::default())
            .expect("plan should validate");
        assert_eq!(report.to_string(), "Plan is permitted (0 changes checked)");
    }
}

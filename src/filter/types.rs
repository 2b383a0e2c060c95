//! Filter document types.
//!
//! A [`PlanFilter`] records, per resource address, which actions a plan is
//! allowed to perform. It is both the output of plan ingestion and the
//! baseline a later plan is checked against.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::plan::{Action, are_compatible};

/// Current version of the filter format.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Address of one managed resource inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

/// Allowed actions per resource address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFilter {
    /// Filter format version.
    pub format_version: u32,
    /// Actions each address may perform, in first-seen order.
    #[serde(deserialize_with = "non_empty_actions")]
    pub allowed_actions: BTreeMap<Address, Vec<Action>>,
}

impl Address {
    /// Creates an address from a string.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Address {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PlanFilter {
    /// Creates an empty filter at the current format version.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            allowed_actions: BTreeMap::new(),
        }
    }

    /// Records `action` for `address` unless it is already listed.
    ///
    /// Only exact equality deduplicates; compatible actions are kept side by
    /// side.
    pub(crate) fn allow(&mut self, address: &str, action: Action) {
        let actions = self.allowed_actions.entry(Address::new(address)).or_default();
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    /// Returns the actions listed for `address`, empty if it is absent.
    #[must_use]
    pub fn actions_for(&self, address: &str) -> &[Action] {
        self.allowed_actions.get(address).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `action` is listed verbatim for `address`.
    #[must_use]
    pub fn has_action(&self, address: &str, action: Action) -> bool {
        self.actions_for(address).contains(&action)
    }

    /// Returns true if the filter accepts `action` for `address`.
    ///
    /// An exact match is tried first. With `allow_compatible`, any listed
    /// action compatible with `action` is accepted as well.
    #[must_use]
    pub fn permits(&self, address: &str, action: Action, allow_compatible: bool) -> bool {
        if self.has_action(address, action) {
            return true;
        }
        allow_compatible
            && self
                .actions_for(address)
                .iter()
                .any(|listed| are_compatible(*listed, action))
    }

    /// Returns true if the filter lists no addresses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed_actions.is_empty()
    }

    /// Returns the number of addresses in the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed_actions.len()
    }

    /// Returns true if the format version is the one this build writes.
    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.format_version == CURRENT_FORMAT_VERSION
    }
}

impl Default for PlanFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects addresses mapped to an empty action list.
fn non_empty_actions<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<Address, Vec<Action>>, D::Error>
where
    D: Deserializer<'de>,
{
    let actions = BTreeMap::<Address, Vec<Action>>::deserialize(deserializer)?;
    if let Some(address) = actions
        .iter()
        .find_map(|(address, listed)| listed.is_empty().then_some(address))
    {
        return Err(de::Error::custom(format!(
            "no actions listed for address {address}"
        )));
    }
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_with(address: &str, actions: &[Action]) -> PlanFilter {
        let mut filter = PlanFilter::new();
        for action in actions {
            filter.allow(address, *action);
        }
        filter
    }

    #[test]
    fn test_has_action_missing_address() {
        let filter = PlanFilter::new();
        assert!(!filter.has_action("a.b.c", Action::Create));
    }

    #[test]
    fn test_has_action_other_action() {
        let filter = filter_with("a.b.c", &[Action::Update, Action::Delete]);
        assert!(!filter.has_action("a.b.c", Action::Create));
    }

    #[test]
    fn test_has_action_present() {
        let filter = filter_with("a.b.c", &[Action::Update, Action::Create]);
        assert!(filter.has_action("a.b.c", Action::Create));
    }

    #[test]
    fn test_allow_is_idempotent() {
        let filter = filter_with("a.b.c", &[Action::Create, Action::Update, Action::Create]);
        assert_eq!(filter.actions_for("a.b.c"), &[Action::Create, Action::Update]);
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_permits_compatible() {
        let filter = filter_with("a.b.c", &[Action::Update]);

        assert!(filter.permits("a.b.c", Action::Update, false));
        assert!(!filter.permits("a.b.c", Action::CreateDelete, false));
        assert!(filter.permits("a.b.c", Action::CreateDelete, true));
        assert!(!filter.permits("a.b.c", Action::Delete, true));
        assert!(!filter.permits("x.y.z", Action::Update, true));
    }

    #[test]
    fn test_document_shape() {
        let filter = filter_with("local_file.foo", &[Action::Create, Action::DeleteCreate]);
        let json = serde_json::to_value(&filter).expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "format_version": 1,
                "allowed_actions": { "local_file.foo": ["create", "delete-create"] }
            })
        );

        let back: PlanFilter = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, filter);
        assert!(back.is_current());
    }

    #[test]
    fn test_decode_rejects_empty_action_list() {
        let err = serde_json::from_str::<PlanFilter>(
            r#"{"format_version": 1, "allowed_actions": {"a.b": ["create"], "c.d": []}}"#,
        )
        .expect_err("empty list should be rejected");
        assert!(err.to_string().contains("no actions listed for address c.d"));
    }

    #[test]
    fn test_decode_rejects_non_modifying_actions() {
        for name in ["invalid", "no-op", "read"] {
            let json = format!(r#"{{"format_version": 1, "allowed_actions": {{"a.b": ["{name}"]}}}}"#);
            assert!(serde_json::from_str::<PlanFilter>(&json).is_err(), "{name}");
        }
    }

    #[test]
    fn test_empty_filter() {
        let filter = PlanFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.format_version, CURRENT_FORMAT_VERSION);
    }
}

//! Normalized action vocabulary for resource changes.
//!
//! A plan describes each resource change as an ordered list of low-level
//! verbs. This module folds those verbs into a single [`Action`] and defines
//! which actions are interchangeable between separate plan runs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PlanError;

/// The kind of change applied to one resource.
///
/// Variant order is significant: the compatibility table is keyed by
/// `(min, max)` under the derived ordering. Only actions that modify a
/// resource are accepted when decoding a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// The raw verbs did not match any known form.
    #[serde(rename = "invalid", skip_deserializing)]
    Invalid,
    /// Nothing changes.
    #[serde(rename = "no-op", skip_deserializing)]
    NoOp,
    /// Data is read, nothing is modified.
    #[serde(rename = "read", skip_deserializing)]
    Read,
    /// The resource is created.
    #[serde(rename = "create")]
    Create,
    /// The resource is updated in place.
    #[serde(rename = "update")]
    Update,
    /// The resource is destroyed.
    #[serde(rename = "delete")]
    Delete,
    /// Destructive replace: destroyed, then created.
    #[serde(rename = "delete-create")]
    DeleteCreate,
    /// Non-destructive replace: created, then the old one destroyed.
    #[serde(rename = "create-delete")]
    CreateDelete,
}

/// Pairs of distinct actions that may describe the same change in different
/// plan runs. Each pair is stored as `(min, max)`.
const COMPATIBLE_PAIRS: &[(Action, Action)] = &[
    (Action::Create, Action::Update),
    (Action::Create, Action::DeleteCreate),
    (Action::Create, Action::CreateDelete),
    (Action::Update, Action::DeleteCreate),
    (Action::Update, Action::CreateDelete),
];

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Invalid,
        Self::NoOp,
        Self::Read,
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::DeleteCreate,
        Self::CreateDelete,
    ];

    /// Converts the raw verb sequence of a resource change.
    ///
    /// Anything other than the seven known forms yields [`Action::Invalid`].
    #[must_use]
    pub fn from_raw<S: AsRef<str>>(verbs: &[S]) -> Self {
        let verbs: Vec<&str> = verbs.iter().map(AsRef::as_ref).collect();
        match verbs.as_slice() {
            ["no-op"] => Self::NoOp,
            ["read"] => Self::Read,
            ["create"] => Self::Create,
            ["update"] => Self::Update,
            ["delete"] => Self::Delete,
            ["delete", "create"] => Self::DeleteCreate,
            ["create", "delete"] => Self::CreateDelete,
            _ => Self::Invalid,
        }
    }

    /// Returns the wire name used in filter documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::NoOp => "no-op",
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::DeleteCreate => "delete-create",
            Self::CreateDelete => "create-delete",
        }
    }

    /// Human-readable past-tense label.
    ///
    /// Only actions that modify a resource have one.
    #[must_use]
    pub const fn pretty(self) -> Option<&'static str> {
        match self {
            Self::Create => Some("created"),
            Self::Update => Some("updated"),
            Self::Delete => Some("deleted"),
            Self::DeleteCreate => Some("replaced (deleted then re-created)"),
            Self::CreateDelete => Some("replaced (re-created before deletion)"),
            Self::Invalid | Self::NoOp | Self::Read => None,
        }
    }

    /// Returns true if this action modifies a resource and belongs in a filter.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        !matches!(self, Self::Invalid | Self::NoOp | Self::Read)
    }
}

/// Returns true if the two actions are equal or form a known compatible pair.
///
/// The relation is symmetric but not transitive.
#[must_use]
pub fn are_compatible(left: Action, right: Action) -> bool {
    if left == right {
        return true;
    }
    let key = if left < right { (left, right) } else { (right, left) };
    COMPATIBLE_PAIRS.contains(&key)
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = PlanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| PlanError::unrecognized(&[s]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_known_forms() {
        assert_eq!(Action::from_raw(&["no-op"]), Action::NoOp);
        assert_eq!(Action::from_raw(&["read"]), Action::Read);
        assert_eq!(Action::from_raw(&["create"]), Action::Create);
        assert_eq!(Action::from_raw(&["update"]), Action::Update);
        assert_eq!(Action::from_raw(&["delete"]), Action::Delete);
        assert_eq!(Action::from_raw(&["delete", "create"]), Action::DeleteCreate);
        assert_eq!(Action::from_raw(&["create", "delete"]), Action::CreateDelete);
    }

    #[test]
    fn test_from_raw_unknown_forms() {
        let empty: [&str; 0] = [];
        assert_eq!(Action::from_raw(&empty), Action::Invalid);
        assert_eq!(Action::from_raw(&["invalid-verb"]), Action::Invalid);
        assert_eq!(Action::from_raw(&["create", "create"]), Action::Invalid);
        assert_eq!(Action::from_raw(&["update", "delete"]), Action::Invalid);
        assert_eq!(Action::from_raw(&["delete", "create", "read"]), Action::Invalid);
    }

    #[test]
    fn test_from_raw_accepts_owned_strings() {
        let verbs = vec![String::from("create"), String::from("delete")];
        assert_eq!(Action::from_raw(verbs.as_slice()), Action::CreateDelete);
    }

    #[test]
    fn test_compatible_reflexive() {
        for action in Action::ALL {
            assert!(are_compatible(action, action), "{action} should match itself");
        }
    }

    #[test]
    fn test_compatible_symmetric() {
        for left in Action::ALL {
            for right in Action::ALL {
                assert_eq!(
                    are_compatible(left, right),
                    are_compatible(right, left),
                    "{left} / {right}"
                );
            }
        }
    }

    #[test]
    fn test_compatible_pairs() {
        assert!(are_compatible(Action::Update, Action::Create));
        assert!(are_compatible(Action::CreateDelete, Action::Create));
        assert!(are_compatible(Action::DeleteCreate, Action::Update));
        assert!(!are_compatible(Action::DeleteCreate, Action::CreateDelete));
        assert!(!are_compatible(Action::Delete, Action::Create));
        assert!(!are_compatible(Action::NoOp, Action::Read));
    }

    #[test]
    fn test_compatible_table_is_canonical() {
        for (left, right) in COMPATIBLE_PAIRS {
            assert!(left < right, "{left} / {right} is not stored as (min, max)");
        }
    }

    #[test]
    fn test_pretty() {
        assert_eq!(Action::Create.pretty(), Some("created"));
        assert_eq!(
            Action::CreateDelete.pretty(),
            Some("replaced (re-created before deletion)")
        );
        assert_eq!(Action::NoOp.pretty(), None);
        assert_eq!(Action::Read.pretty(), None);
        assert_eq!(Action::Invalid.pretty(), None);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&[Action::DeleteCreate, Action::Update])
            .expect("serialize");
        assert_eq!(json, r#"["delete-create","update"]"#);

        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().ok(), Some(action));
        }
        assert!("replace".parse::<Action>().is_err());
    }

    #[test]
    fn test_decode_only_actionable() {
        for action in Action::ALL {
            let decoded = serde_json::from_str::<Action>(&format!("\"{action}\""));
            assert_eq!(decoded.is_ok(), action.is_actionable(), "{action}");
        }
    }
}

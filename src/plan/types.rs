//! Raw plan document types.
//!
//! Only the slice of the upstream JSON plan schema needed to build and check
//! filters is modelled here. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use super::action::Action;

/// A plan document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Upstream plan format version, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    /// Proposed resource changes.
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
}

/// One resource change entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Address of the resource.
    pub address: String,
    /// Whether the entry is a managed resource or a data source.
    #[serde(default)]
    pub mode: ResourceMode,
    /// The proposed change.
    #[serde(default)]
    pub change: Change,
}

/// Resource mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    /// A resource whose lifecycle is controlled by the tool.
    Managed,
    /// A read-only data lookup.
    Data,
    /// Any mode this tool does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// The change block of a resource change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Change {
    /// Ordered low-level verbs, e.g. `["delete", "create"]`.
    #[serde(default)]
    pub actions: Vec<String>,
}

impl Plan {
    /// Returns the managed resource changes, in document order.
    pub fn managed_changes(&self) -> impl Iterator<Item = &ResourceChange> {
        self.resource_changes.iter().filter(|rc| rc.is_managed())
    }
}

impl ResourceChange {
    /// Creates a managed resource change from raw verbs.
    #[must_use]
    pub fn managed<S: AsRef<str>>(address: impl Into<String>, verbs: &[S]) -> Self {
        Self {
            address: address.into(),
            mode: ResourceMode::Managed,
            change: Change {
                actions: verbs.iter().map(|v| v.as_ref().to_string()).collect(),
            },
        }
    }

    /// Returns true if this entry describes a managed resource.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.mode == ResourceMode::Managed
    }

    /// Converts the raw verbs into an [`Action`].
    #[must_use]
    pub fn action(&self) -> Action {
        Action::from_raw(self.change.actions.as_slice())
    }
}

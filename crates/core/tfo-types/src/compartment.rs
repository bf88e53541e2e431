//! Compartment records as returned by the identity service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tfo_error::TfoError;

/// Two-level defined tags: namespace -> key -> value.
pub type DefinedTags = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// Flat freeform tags: key -> value.
pub type FreeformTags = BTreeMap<String, String>;

/// A compartment as returned by a list call.
///
/// Records are read-only here: `id` and `compartment_id` are assigned by the
/// service and never change, and `lifecycle_state` is only observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compartment {
    /// The compartment's own OCID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// OCID of the parent compartment (or tenancy) owning this compartment
    pub compartment_id: String,

    /// Display name, unique among siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub lifecycle_state: LifecycleState,

    /// Reason flags while the compartment is INACTIVE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive_status: Option<i64>,

    /// Whether the caller can access this compartment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_accessible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defined_tags: Option<DefinedTags>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeform_tags: Option<FreeformTags>,
}

impl Compartment {
    /// Create a minimal record with a parent and a lifecycle state.
    pub fn new(compartment_id: impl Into<String>, lifecycle_state: LifecycleState) -> Self {
        Self {
            id: None,
            compartment_id: compartment_id.into(),
            name: None,
            description: None,
            lifecycle_state,
            inactive_status: None,
            is_accessible: None,
            time_created: None,
            defined_tags: None,
            freeform_tags: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_inactive_status(mut self, inactive_status: i64) -> Self {
        self.inactive_status = Some(inactive_status);
        self
    }

    pub fn with_accessible(mut self, is_accessible: bool) -> Self {
        self.is_accessible = Some(is_accessible);
        self
    }

    pub fn with_time_created(mut self, time_created: DateTime<Utc>) -> Self {
        self.time_created = Some(time_created);
        self
    }

    pub fn with_defined_tags(mut self, defined_tags: DefinedTags) -> Self {
        self.defined_tags = Some(defined_tags);
        self
    }

    pub fn with_freeform_tags(mut self, freeform_tags: FreeformTags) -> Self {
        self.freeform_tags = Some(freeform_tags);
        self
    }
}

/// Lifecycle state of a compartment.
///
/// Values the service adds later are kept verbatim in [`LifecycleState::Unknown`]
/// so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LifecycleState {
    Creating,
    Active,
    Inactive,
    Deleting,
    Deleted,
    Unknown(String),
}

impl LifecycleState {
    /// The service's spelling of this state.
    pub fn as_str(&self) -> &str {
        match self {
            LifecycleState::Creating => "CREATING",
            LifecycleState::Active => "ACTIVE",
            LifecycleState::Inactive => "INACTIVE",
            LifecycleState::Deleting => "DELETING",
            LifecycleState::Deleted => "DELETED",
            LifecycleState::Unknown(raw) => raw,
        }
    }
}

impl From<String> for LifecycleState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CREATING" => LifecycleState::Creating,
            "ACTIVE" => LifecycleState::Active,
            "INACTIVE" => LifecycleState::Inactive,
            "DELETING" => LifecycleState::Deleting,
            "DELETED" => LifecycleState::Deleted,
            _ => LifecycleState::Unknown(raw),
        }
    }
}

impl From<LifecycleState> for String {
    fn from(state: LifecycleState) -> Self {
        match state {
            LifecycleState::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which compartments a list call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    /// Every compartment, regardless of the caller's permissions
    Any,

    /// Only compartments the caller has access to
    Accessible,
}

impl AccessLevel {
    /// Query-string spelling of this access level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Any => "ANY",
            AccessLevel::Accessible => "ACCESSIBLE",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = TfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANY" => Ok(AccessLevel::Any),
            "ACCESSIBLE" => Ok(AccessLevel::Accessible),
            _ => Err(TfoError::Config(format!(
                "Invalid access_level '{s}' (expected ANY or ACCESSIBLE)"
            ))),
        }
    }
}

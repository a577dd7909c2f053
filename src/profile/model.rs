//! Deserializable representation of one interop profile document.
//!
//! The types mirror `schema/interop-profile.schema.json` so pipeline stages
//! and tests can reason about profile data without ad-hoc JSON handling.
//! Capability lookups go through [`Profile::capability`]; an absent group or
//! item is `None`, which is distinct from an entry that is present but
//! declares `supported: false`.

use crate::profile::identity::{ProfileId, ProfileStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One versioned interoperability specification and its declared capability
/// support.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub schema_version: String,
    pub identity: ProfileIdentity,
    /// Capability group name -> capability item name -> entry. Both levels are
    /// keyed maps; consumers look up by key, never by position.
    pub capabilities: BTreeMap<String, BTreeMap<String, CapabilityEntry>>,
}

/// Identifying metadata for a profile.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIdentity {
    pub id: ProfileId,
    pub name: String,
    pub version: String,
    pub status: ProfileStatus,
    pub spec_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Declared support for a single capability item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapabilityEntry {
    pub supported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Profile {
    /// Look up a capability entry by group and item name.
    ///
    /// Returns `None` when either key is absent; consumers render that as
    /// "unknown" rather than treating it as an error.
    pub fn capability(&self, group: &str, item: &str) -> Option<&CapabilityEntry> {
        self.capabilities.get(group)?.get(item)
    }
}

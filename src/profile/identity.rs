use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable unique key for an interop profile (e.g., `diip-v5`).
///
/// The id doubles as the identifier segment of the profile's filename
/// (`interop-profile.<id>.json`); the loader enforces that the two agree.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle stage declared by a profile.
///
/// Known variants keep serialization consistent; `Other` preserves forward
/// compatibility so statistics can tally a status the schema does not know
/// about instead of dropping the profile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProfileStatus {
    Draft,
    Stable,
    Deprecated,
    Other(String),
}

impl ProfileStatus {
    /// The closed set of statuses the schema admits, in a fixed order used to
    /// zero-initialize per-status counters.
    pub const KNOWN: [ProfileStatus; 3] = [
        ProfileStatus::Draft,
        ProfileStatus::Stable,
        ProfileStatus::Deprecated,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ProfileStatus::Draft => "draft",
            ProfileStatus::Stable => "stable",
            ProfileStatus::Deprecated => "deprecated",
            ProfileStatus::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "draft" => ProfileStatus::Draft,
            "stable" => ProfileStatus::Stable,
            "deprecated" => ProfileStatus::Deprecated,
            other => ProfileStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for ProfileStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProfileStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

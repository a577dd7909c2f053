//! Profile data model.
//!
//! This module wraps the profile documents stored under `profiles/` so
//! pipeline stages share one typed view of the data. Types mirror the fields
//! of `schema/interop-profile.schema.json`; callers use
//! [`Profile::capability`] for optional capability lookups.

pub mod identity;
pub mod model;

pub use identity::{ProfileId, ProfileStatus};
pub use model::{CapabilityEntry, Profile, ProfileIdentity};

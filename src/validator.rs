//! Schema validation of loaded profile documents.
//!
//! The schema is an external, versioned artifact loaded and compiled once per
//! run (draft 2020-12 semantics via the `jsonschema` crate). Validation is a
//! batch lint: every document is checked and every violation is collected
//! before the run fails, so an author fixing several profiles sees the full
//! picture in one pass. Only a fully valid set is materialized into typed
//! [`Profile`] records.

use crate::error::{PipelineError, ProfileFailure, ValidationReport};
use crate::loader::SourceProfile;
use crate::profile::Profile;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Compiled profile schema plus the raw document it was built from.
pub struct ProfileSchema {
    compiled: JSONSchema,
    // Keeps the schema document alive for the lifetime of `compiled`, which
    // borrows it through the pointer handed to `JSONSchema::compile`.
    raw: Arc<Value>,
}

impl std::fmt::Debug for ProfileSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `JSONSchema` does not implement `Debug`, so elide the compiled form.
        f.debug_struct("ProfileSchema").field("raw", &self.raw).finish_non_exhaustive()
    }
}

impl ProfileSchema {
    /// Read, parse, and compile the schema at `path`.
    ///
    /// A missing or malformed schema is an environment error: the input set
    /// may be fine, but the run cannot judge it.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        if !path.is_file() {
            return Err(PipelineError::MissingSchema(path.to_path_buf()));
        }
        let data = fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let schema_value: Value =
            serde_json::from_str(&data).map_err(|err| PipelineError::Schema {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let raw = Arc::new(schema_value);
        let raw_static: &'static Value = unsafe { &*(Arc::as_ptr(&raw)) };
        let compiled = JSONSchema::compile(raw_static).map_err(|err| PipelineError::Schema {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        Ok(Self { compiled, raw })
    }

    /// The raw schema document, as parsed from disk.
    pub fn document(&self) -> &Value {
        &self.raw
    }

    /// Violations for a single document, one line per failed constraint.
    pub fn check(&self, document: &Value) -> Vec<String> {
        match self.compiled.validate(document) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|err| {
                    let pointer = err.instance_path.to_string();
                    if pointer.is_empty() {
                        format!("/: {err}")
                    } else {
                        format!("{pointer}: {err}")
                    }
                })
                .collect(),
        }
    }
}

/// Validate every source document against the schema; only a fully clean set
/// passes.
///
/// Violations are accumulated across all profiles and returned as one
/// [`ValidationReport`]. On success the documents are converted into typed
/// profiles in the same (filename) order they were loaded.
pub fn validate_profiles(
    schema: &ProfileSchema,
    sources: &[SourceProfile],
) -> Result<Vec<Profile>, PipelineError> {
    let mut failures = Vec::new();
    for source in sources {
        let violations = schema.check(&source.document);
        if !violations.is_empty() {
            failures.push(ProfileFailure {
                file_name: source.file_name.clone(),
                profile_id: source.expected_id.clone(),
                violations,
            });
        }
    }
    if !failures.is_empty() {
        return Err(PipelineError::Validation(ValidationReport { failures }));
    }

    let mut profiles = Vec::with_capacity(sources.len());
    for source in sources {
        let profile: Profile = serde_json::from_value(source.document.clone()).map_err(|err| {
            PipelineError::Parse {
                file: source.file_name.clone(),
                source: err,
            }
        })?;
        profiles.push(profile);
    }
    Ok(profiles)
}

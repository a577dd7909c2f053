//! Discovery and parsing of profile source files.
//!
//! The loader walks the profiles directory for files matching
//! `interop-profile.<id>.json`, parses each as raw JSON, and cross-checks the
//! declared `identity.id` against the id encoded in the filename. Documents
//! stay untyped at this stage: shape problems belong to the validator, which
//! reports them as one batch instead of stopping at the first bad file. A
//! syntax error or identity mismatch, by contrast, means the input set itself
//! is untrustworthy and aborts the run immediately.

use crate::error::PipelineError;
use crate::expected_profile_id;
use crate::profile::ProfileId;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered profile file, parsed but not yet schema-validated.
#[derive(Debug, Clone)]
pub struct SourceProfile {
    pub file_name: String,
    pub path: PathBuf,
    /// The id stripped from the filename; already verified to match the
    /// document's `identity.id`.
    pub expected_id: ProfileId,
    pub document: Value,
}

/// Load every profile file under `profiles_dir` in lexicographic filename
/// order.
///
/// Returns an empty vector when the directory holds no matching files; the
/// caller decides whether that short-circuits the run. A missing directory is
/// an environment error, and any parse or identity failure aborts the whole
/// load so a partial aggregate can never be produced.
pub fn load_profiles(profiles_dir: &Path) -> Result<Vec<SourceProfile>, PipelineError> {
    if !profiles_dir.is_dir() {
        return Err(PipelineError::MissingProfilesDir(profiles_dir.to_path_buf()));
    }

    let mut discovered: Vec<(String, ProfileId, PathBuf)> = Vec::new();
    let entries = fs::read_dir(profiles_dir).map_err(|source| PipelineError::Read {
        path: profiles_dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::Read {
            path: profiles_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(id) = expected_profile_id(file_name) {
            discovered.push((file_name.to_string(), ProfileId(id.to_string()), path));
        }
    }

    // Byte-order sort keeps processing independent of directory iteration
    // order, which readdir does not guarantee.
    discovered.sort_by(|a, b| a.0.cmp(&b.0));

    let mut sources = Vec::with_capacity(discovered.len());
    for (file_name, expected_id, path) in discovered {
        sources.push(load_one(file_name, expected_id, path)?);
    }
    Ok(sources)
}

fn load_one(
    file_name: String,
    expected: ProfileId,
    path: PathBuf,
) -> Result<SourceProfile, PipelineError> {
    let data = fs::read_to_string(&path).map_err(|source| PipelineError::Read {
        path: path.clone(),
        source,
    })?;
    let document: Value = serde_json::from_str(&data).map_err(|source| PipelineError::Parse {
        file: file_name.clone(),
        source,
    })?;

    let Some(actual) = document.pointer("/identity/id").and_then(Value::as_str) else {
        return Err(PipelineError::MissingIdentity {
            file: file_name,
            expected,
        });
    };
    if actual != expected.0 {
        return Err(PipelineError::IdentityMismatch {
            file: file_name,
            expected,
            actual: ProfileId(actual.to_string()),
        });
    }

    Ok(SourceProfile {
        file_name,
        path,
        expected_id: expected,
        document,
    })
}

/// True when `file_name` follows the profile naming convention with a
/// non-empty id segment.
pub fn is_profile_file(file_name: &str) -> bool {
    expected_profile_id(file_name).is_some()
}

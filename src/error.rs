//! Error taxonomy for the aggregation pipeline.
//!
//! Stages never terminate the process themselves; they return a
//! [`PipelineError`] and the binary's single top-level handler maps the kind
//! to an exit code. Environment problems (missing inputs, I/O) and authoring
//! problems (bad JSON, filename/identity mismatch) abort immediately; schema
//! violations are batched into one [`ValidationReport`] covering every
//! failing profile.

use crate::profile::ProfileId;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for environment errors (missing directory/schema, I/O failures).
pub const EXIT_ENVIRONMENT: i32 = 2;
/// Exit code for authoring errors (unparsable file, identity mismatch).
pub const EXIT_AUTHORING: i32 = 3;
/// Exit code for schema validation failures.
pub const EXIT_VALIDATION: i32 = 4;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("profiles directory not found: {}", .0.display())]
    MissingProfilesDir(PathBuf),

    #[error("schema file not found: {}", .0.display())]
    MissingSchema(PathBuf),

    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid schema {}: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },

    #[error("unable to parse {file}: {source}")]
    Parse {
        file: String,
        source: serde_json::Error,
    },

    #[error("{file} declares no identity.id (expected '{expected}' from the filename)")]
    MissingIdentity { file: String, expected: ProfileId },

    #[error("profile id mismatch in {file}: expected '{expected}' from the filename, found '{actual}'")]
    IdentityMismatch {
        file: String,
        expected: ProfileId,
        actual: ProfileId,
    },

    #[error("{0}")]
    Validation(ValidationReport),
}

impl PipelineError {
    /// Map the error kind to the process exit code reported by the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::MissingProfilesDir(_)
            | PipelineError::MissingSchema(_)
            | PipelineError::Read { .. }
            | PipelineError::Write { .. }
            | PipelineError::Schema { .. } => EXIT_ENVIRONMENT,
            PipelineError::Parse { .. }
            | PipelineError::MissingIdentity { .. }
            | PipelineError::IdentityMismatch { .. } => EXIT_AUTHORING,
            PipelineError::Validation(_) => EXIT_VALIDATION,
        }
    }
}

/// Every schema violation across every failing profile, gathered before the
/// run aborts. This is a batch lint result, not a fail-fast parse error.
#[derive(Debug)]
pub struct ValidationReport {
    pub failures: Vec<ProfileFailure>,
}

/// Violations recorded for a single profile document.
#[derive(Debug)]
pub struct ProfileFailure {
    pub file_name: String,
    pub profile_id: ProfileId,
    pub violations: Vec<String>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "schema validation failed for {} profile(s):",
            self.failures.len()
        )?;
        for failure in &self.failures {
            writeln!(f, "  {} ({}):", failure.file_name, failure.profile_id.0)?;
            for violation in &failure.violations {
                writeln!(f, "    {violation}")?;
            }
        }
        Ok(())
    }
}

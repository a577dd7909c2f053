//! Shared library for the interop-matrix aggregation pipeline.
//!
//! The crate turns a directory of interop profile documents into one merged,
//! schema-validated, deterministically ordered JSON artifact. Four stages
//! (loader, validator, aggregator, writer) run strictly in sequence; each is
//! a pure function over the previous stage's output except the writer, which
//! owns the single durable side effect. The `interop-aggregate` binary wires
//! the stages together and maps [`PipelineError`] kinds to exit codes.

use std::path::PathBuf;

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod profile;
pub mod validator;
pub mod writer;

pub use aggregate::{Aggregate, Statistics, build_aggregate};
pub use error::{
    EXIT_AUTHORING, EXIT_ENVIRONMENT, EXIT_VALIDATION, PipelineError, ProfileFailure,
    ValidationReport,
};
pub use loader::{SourceProfile, is_profile_file, load_profiles};
pub use profile::{CapabilityEntry, Profile, ProfileId, ProfileIdentity, ProfileStatus};
pub use validator::{ProfileSchema, validate_profiles};
pub use writer::{write_aggregate, write_aggregate_stamped};

/// Profile files are named `interop-profile.<id>.json`.
pub const PROFILE_FILE_PREFIX: &str = "interop-profile.";
pub const PROFILE_FILE_SUFFIX: &str = ".json";

/// Extract the profile id encoded in a filename, if the name follows the
/// convention with a non-empty id segment.
pub fn expected_profile_id(file_name: &str) -> Option<&str> {
    let id = file_name
        .strip_prefix(PROFILE_FILE_PREFIX)?
        .strip_suffix(PROFILE_FILE_SUFFIX)?;
    if id.is_empty() { None } else { Some(id) }
}

/// Filesystem locations the pipeline reads and writes.
///
/// Paths are always passed explicitly to the stages; nothing is resolved from
/// ambient process state. `Default` supplies the conventional repo-relative
/// layout.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub profiles_dir: PathBuf,
    pub schema_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from("profiles"),
            schema_path: PathBuf::from("schema/interop-profile.schema.json"),
            output_path: PathBuf::from("data/aggregated.json"),
        }
    }
}

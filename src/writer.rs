//! Serialization of the aggregate to its single output artifact.
//!
//! The writer is the only stage with a durable side effect. It stamps
//! `generatedAt` at the moment of writing, creates the destination directory
//! if needed, and replaces the artifact wholesale via a temp file renamed
//! into place so a concurrent reader never observes a partial write.

use crate::aggregate::{Aggregate, Statistics};
use crate::error::PipelineError;
use crate::profile::Profile;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Wire shape of the artifact: the aggregate plus its generation stamp.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Artifact<'a> {
    generated_at: &'a str,
    profiles: &'a [Profile],
    statistics: &'a Statistics,
}

/// Write the aggregate to `output_path`, stamped with the current UTC
/// instant.
///
/// The stamp changes on every run even when profile content does not;
/// consumers must not treat it as a content hash.
pub fn write_aggregate(output_path: &Path, aggregate: &Aggregate) -> Result<(), PipelineError> {
    let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    write_aggregate_stamped(output_path, aggregate, &generated_at)
}

/// Deterministic core of [`write_aggregate`] with an explicit stamp.
pub fn write_aggregate_stamped(
    output_path: &Path,
    aggregate: &Aggregate,
    generated_at: &str,
) -> Result<(), PipelineError> {
    let parent = match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
        path: parent.to_path_buf(),
        source,
    })?;

    let artifact = Artifact {
        generated_at,
        profiles: &aggregate.profiles,
        statistics: &aggregate.statistics,
    };

    // Stage the full serialization in the destination directory so the final
    // rename stays on one filesystem.
    let mut staged =
        NamedTempFile::new_in(parent).map_err(|source| PipelineError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;
    serde_json::to_writer_pretty(&mut staged, &artifact).map_err(|err| PipelineError::Write {
        path: output_path.to_path_buf(),
        source: err.into(),
    })?;
    staged
        .write_all(b"\n")
        .map_err(|source| PipelineError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;
    staged
        .persist(output_path)
        .map_err(|err| PipelineError::Write {
            path: output_path.to_path_buf(),
            source: err.error,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_aggregate;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn sample_aggregate() -> Aggregate {
        let profile: Profile = serde_json::from_value(json!({
            "schemaVersion": "1.0",
            "identity": {
                "id": "diip-v5",
                "name": "Digital Identity Interop Profile",
                "version": "5.0",
                "status": "stable",
                "specUrl": "https://example.org/diip/v5"
            },
            "capabilities": {
                "credentialFormat": { "sdJwtVc": { "supported": true } }
            }
        }))
        .unwrap();
        build_aggregate(vec![profile])
    }

    #[test]
    fn creates_intermediate_directories() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("data/nested/aggregated.json");
        write_aggregate_stamped(&output, &sample_aggregate(), "2026-08-06T00:00:00.000Z")
            .expect("write succeeds");
        assert!(output.is_file());
    }

    #[test]
    fn artifact_matches_the_output_contract() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("aggregated.json");
        write_aggregate_stamped(&output, &sample_aggregate(), "2026-08-06T00:00:00.000Z")
            .expect("write succeeds");

        let data = fs::read_to_string(&output).unwrap();
        assert!(data.ends_with('\n'), "artifact ends with a newline");
        let value: Value = serde_json::from_str(&data).unwrap();
        assert_eq!(
            value.get("generatedAt").and_then(Value::as_str),
            Some("2026-08-06T00:00:00.000Z")
        );
        assert!(value.get("profiles").is_some_and(Value::is_array));
        assert_eq!(
            value
                .pointer("/statistics/totalProfiles")
                .and_then(Value::as_u64),
            Some(1)
        );
        assert_eq!(
            value
                .pointer("/statistics/byStatus/stable")
                .and_then(Value::as_u64),
            Some(1)
        );
    }

    #[test]
    fn rewrites_are_identical_apart_from_the_stamp() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.json");
        let second = temp.path().join("second.json");
        let aggregate = sample_aggregate();
        write_aggregate_stamped(&first, &aggregate, "2026-08-06T00:00:00.000Z").unwrap();
        write_aggregate_stamped(&second, &aggregate, "2026-08-06T00:00:00.000Z").unwrap();
        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn replaces_an_existing_artifact_unconditionally() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("aggregated.json");
        fs::write(&output, "stale content").unwrap();
        write_aggregate_stamped(&output, &sample_aggregate(), "2026-08-06T00:00:00.000Z")
            .unwrap();
        let data = fs::read_to_string(&output).unwrap();
        assert!(!data.contains("stale content"));
        assert!(data.contains("generatedAt"));
    }

    #[test]
    fn live_stamp_parses_as_rfc3339() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("aggregated.json");
        write_aggregate(&output, &sample_aggregate()).unwrap();
        let value: Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let stamp = value
            .get("generatedAt")
            .and_then(Value::as_str)
            .expect("stamp present");
        chrono::DateTime::parse_from_rfc3339(stamp).expect("stamp is RFC 3339");
        assert!(stamp.ends_with('Z'), "stamp uses the UTC marker");
    }
}

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub fn canonical_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/interop-profile.schema.json")
}

pub fn shipped_profiles_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("profiles")
}

/// Write `document` as `interop-profile.<file_id>.json` under `dir`.
///
/// The file id is deliberately independent of the document's identity so
/// tests can provoke filename/identity mismatches.
pub fn write_profile(dir: &Path, file_id: &str, document: &Value) -> PathBuf {
    let path = dir.join(format!("interop-profile.{file_id}.json"));
    fs::write(&path, serde_json::to_string_pretty(document).expect("serialize fixture"))
        .expect("write profile fixture");
    path
}

/// A schema-conformant profile document with a small capability map.
pub fn profile_document(id: &str, status: &str) -> Value {
    json!({
        "schemaVersion": "1.0",
        "identity": {
            "id": id,
            "name": format!("Profile {id}"),
            "version": "1.0",
            "status": status,
            "specUrl": format!("https://example.org/{id}")
        },
        "capabilities": {
            "credentialFormat": {
                "sdJwtVc": { "supported": true },
                "mdoc": { "supported": false, "note": "not yet" }
            },
            "issuanceProtocol": {
                "oid4vci": { "supported": true, "version": "1.0" }
            }
        }
    })
}

/// Write a deliberately permissive schema that accepts any JSON object, used
/// to test defensive behavior for documents the canonical schema would
/// reject.
pub fn write_lenient_schema(dir: &Path) -> PathBuf {
    let path = dir.join("lenient.schema.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(&json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object"
        }))
        .expect("serialize schema"),
    )
    .expect("write lenient schema");
    path
}

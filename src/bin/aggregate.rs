//! Entry point for the aggregation pipeline.
//!
//! Wires the four stages together (load, validate, aggregate, write) and
//! reports each decision on the console. The exit code is the authoritative
//! success signal for automation: 0 on success (including the nothing-to-do
//! empty-input run), 2 for environment errors, 3 for authoring errors, 4 for
//! schema validation failures.

use anyhow::{Result, anyhow};
use interop_matrix::{
    PipelineConfig, PipelineError, SourceProfile, build_aggregate, load_profiles,
    validate_profiles, validator::ProfileSchema, write_aggregate,
};
use serde_json::Value;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

fn main() {
    let cli = match CliArgs::parse(env::args_os().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err:#}");
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &CliArgs) -> Result<(), PipelineError> {
    let config = &cli.config;

    println!(
        "Scanning profiles directory {}",
        config.profiles_dir.display()
    );
    let sources = load_profiles(&config.profiles_dir)?;
    println!("  found {} profile file(s)", sources.len());

    if sources.is_empty() {
        eprintln!(
            "warning: no profile files found under {} (expected interop-profile.<id>.json); nothing to do",
            config.profiles_dir.display()
        );
        return Ok(());
    }

    for source in &sources {
        println!("  loaded {}: {}", source.file_name, describe(source));
    }

    println!(
        "Validating {} profile(s) against {}",
        sources.len(),
        config.schema_path.display()
    );
    let schema = ProfileSchema::load(&config.schema_path)?;
    let profiles = validate_profiles(&schema, &sources)?;
    for profile in &profiles {
        println!("  {}: valid", profile.identity.id);
    }
    println!("All profiles passed schema validation");

    if cli.validate_only {
        println!("Validation complete");
        return Ok(());
    }

    let aggregate = build_aggregate(profiles);
    println!("Writing aggregate to {}", config.output_path.display());
    write_aggregate(&config.output_path, &aggregate)?;
    println!("  total profiles: {}", aggregate.statistics.total_profiles);
    for (status, count) in &aggregate.statistics.by_status {
        println!("  {status}: {count}");
    }
    println!("Aggregation complete");
    Ok(())
}

/// One-line description of a loaded document for the progress log.
///
/// Pulled loosely from the raw JSON because the document has not been
/// schema-validated yet; missing fields render as `?`.
fn describe(source: &SourceProfile) -> String {
    let field = |pointer: &str| {
        source
            .document
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_string()
    };
    format!(
        "{} {} ({})",
        field("/identity/name"),
        field("/identity/version"),
        field("/identity/status")
    )
}

struct CliArgs {
    config: PipelineConfig,
    validate_only: bool,
}

impl CliArgs {
    fn parse(args: impl Iterator<Item = OsString>) -> Result<Self> {
        let mut args = args;
        let mut config = PipelineConfig::default();
        let mut validate_only = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .to_str()
                .ok_or_else(|| anyhow!("Invalid UTF-8 in argument"))?
                .to_string();
            match arg.as_str() {
                "--validate-only" => validate_only = true,
                "--profiles-dir" => {
                    config.profiles_dir = PathBuf::from(next_value(&mut args, "--profiles-dir")?)
                }
                "--schema" => {
                    config.schema_path = PathBuf::from(next_value(&mut args, "--schema")?)
                }
                "--output" => {
                    config.output_path = PathBuf::from(next_value(&mut args, "--output")?)
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => return Err(anyhow!("Unknown flag: {other}")),
            }
        }

        Ok(Self {
            config,
            validate_only,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<OsString> {
    args.next().ok_or_else(|| anyhow!("Missing value for {flag}"))
}

fn print_usage() {
    eprintln!("{}", usage());
}

fn usage() -> &'static str {
    "Usage: interop-aggregate [options]\n\nOptions:\n  --validate-only        run the loader and validator, skip aggregation and writing\n  --profiles-dir PATH    profiles directory (default: profiles)\n  --schema PATH          profile schema (default: schema/interop-profile.schema.json)\n  --output PATH          output artifact (default: data/aggregated.json)\n  -h, --help             print this help\n"
}

//! mdschema: check markdown document outlines against a section schema.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use mdschema::check;
use mdschema::config::{Config, CONFIG_FILE};
use mdschema::diagnostic::RuleResult;
use mdschema::document::ParseOptions;
use mdschema::input;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdschema")]
#[command(about = "Validate markdown outlines against a section schema", long_about = None)]
struct Args {
    /// Files or directories to check
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// YAML schema describing the expected sections
    #[arg(long, short = 's', value_name = "FILE")]
    schema: Option<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Print diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Reject front matter that is not a YAML mapping
    #[arg(long)]
    strict_front_matter: bool,
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    diagnostics: Vec<RuleResult>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MDSCHEMA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    cfg.strict_front_matter |= args.strict_front_matter;

    let Some(schema_path) = args.schema.or_else(|| cfg.schema.map(PathBuf::from)) else {
        eprintln!("No schema given: pass --schema or set `schema` in {CONFIG_FILE}");
        return ExitCode::from(2);
    };
    let schema = match check::load_schema(&schema_path) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let documents = match input::find_documents(args.paths, &cfg.file_extensions) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if documents.is_empty() {
        eprintln!("No matching files found");
        return ExitCode::SUCCESS;
    }

    let options = ParseOptions {
        strict_front_matter: cfg.strict_front_matter,
    };
    let mut failed = false;
    let mut reports = Vec::with_capacity(documents.len());
    for path in &documents {
        match check::check_file(path, &schema, options) {
            Ok(diagnostics) => {
                failed |= !diagnostics.is_empty();
                reports.push(FileReport { path, diagnostics });
            }
            Err(e) => {
                failed = true;
                eprintln!("Error: {e}");
            }
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            for result in &report.diagnostics {
                println!("{}", result.render(report.path));
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

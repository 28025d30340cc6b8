//! Variant Engine CLI - Bridge interface for the render backend
//!
//! Commands: select, regenerate, seed, palettes, variants, fingerprint
//! Outputs JSON to stdout, logs to stderr (RUST_LOG, default "warn")
//! Returns non-zero on configuration or payload errors

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use variant_engine::{DesignCatalog, EngineError, VariantEngine};

#[derive(Parser)]
#[command(name = "variant-engine-cli")]
#[command(about = "Variant Engine CLI - Deterministic brochure design selection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a catalog JSON file (built-in catalog when omitted)
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the design for a project
    Select {
        /// JSON payload (VariantRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Step to another design ("regenerate look")
    Regenerate {
        /// JSON payload (RegenerateRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Print the seed for an identity
    Seed {
        #[arg(long)]
        project_id: String,

        #[arg(long, default_value = "")]
        user_id: String,

        #[arg(long, default_value = "")]
        created_at: String,
    },

    /// List palettes
    Palettes,

    /// List variants in catalog order
    Variants,

    /// Print the catalog fingerprint
    Fingerprint,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. under a test harness) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => print_error(&EngineError::from(e)),
    }
}

fn print_error(error: &dyn std::fmt::Display) -> ExitCode {
    let output = serde_json::json!({
        "success": false,
        "error": error.to_string(),
    });
    println!("{}", output);
    ExitCode::FAILURE
}

fn load_catalog(path: Option<&PathBuf>) -> Result<DesignCatalog, EngineError> {
    match path {
        Some(path) => Ok(DesignCatalog::load_from_file(path)?),
        None => Ok(DesignCatalog::builtin()),
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    // A bad catalog is a startup failure, never a per-request one.
    let catalog = match load_catalog(cli.catalog.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "catalog rejected");
            return print_error(&e);
        }
    };

    let engine = VariantEngine::new(catalog);

    match cli.command {
        Commands::Select { payload } => match engine.build_json(&payload) {
            Ok(record) => print_json(&record),
            Err(e) => print_error(&e),
        },

        Commands::Regenerate { payload } => match engine.regenerate_json(&payload) {
            Ok(record) => print_json(&record),
            Err(e) => print_error(&e),
        },

        Commands::Seed { project_id, user_id, created_at } => {
            let seed = engine.seed(&project_id, &user_id, &created_at);
            print_json(&serde_json::json!({ "seed": seed }))
        }

        Commands::Palettes => {
            let palettes = engine.catalog().palettes();
            let list: Vec<_> = palettes
                .iter()
                .map(|(key, pack)| serde_json::json!({
                    "key": key,
                    "name": pack.name,
                    "primary": pack.primary,
                    "accent": pack.accent,
                    "light": pack.light,
                    "description": pack.description,
                    "default": key == palettes.default_key(),
                }))
                .collect();
            print_json(&list)
        }

        Commands::Variants => {
            let list: Vec<_> = engine.catalog().variants()
                .iter()
                .enumerate()
                .map(|(index, variant)| serde_json::json!({
                    "index": index,
                    "variant": variant,
                }))
                .collect();
            print_json(&list)
        }

        Commands::Fingerprint => match engine.catalog().fingerprint() {
            Ok(fingerprint) => print_json(&serde_json::json!({
                "fingerprint": fingerprint,
                "catalog_version": engine.catalog().catalog_version(),
                "variants": engine.catalog().variants().size(),
                "palettes": engine.catalog().palettes().len(),
            })),
            Err(e) => print_error(&e),
        },
    }
}

//! Application orchestrator.
//! Loads/merges config, initializes logging, validates paths, scans the root,
//! prints statistics, writes reports and runs the optional move.

use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use filer::cli::Args;
use filer::config::{CONFIG_ENV, create_template_config, load_config_from_xml};
use filer::output as out;
use filer::report::{default_report_path, write_moved_csv_file, write_records_csv_file};
use filer::{
    Config, FilerError, MoveEngine, default_config_path, default_size_buckets, folder_size_totals,
    scan, size_bucket_histogram, sort_records, summary, type_histogram,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config / --init-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path)?;
        out::print_success(&format!("A template filer config was written to: {}", path.display()));
        out::print_info("Edit the file to set `root`, `destination` and `extensions`, then re-run filer.");
        return Ok(());
    }

    // XML (if present) replaces defaults; CLI flags win over both.
    let mut cfg = load_config_from_xml()?.unwrap_or_default();
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting filer: {:?}", args);

    let result = execute(&args, &cfg);
    if let Err(e) = &result {
        log_failure(e);
    }

    // Flush file logs before exit
    drop(guard);
    result
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", cfg_env));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default filer config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

fn execute(args: &Args, cfg: &Config) -> Result<()> {
    cfg.validate()?;
    if args.moved_csv.is_some() && cfg.destination.is_none() {
        return Err(FilerError::InvalidConfig("--moved-csv requires a destination".into()).into());
    }

    let scan_cfg = cfg.scan_config();
    let mut records = scan(&scan_cfg)?;
    info!(root = %scan_cfg.root.display(), files = records.len(), "Scanned");

    out::print_summary(&summary(&records));
    out::print_type_distribution(&type_histogram(&records));
    out::print_size_distribution(&size_bucket_histogram(&records, &default_size_buckets())?);
    out::print_folder_sizes(&folder_size_totals(&records));

    if let Some(key) = args.sort {
        sort_records(&mut records, key, args.desc);
    }

    if let Some(target) = &args.csv {
        let path = report_target(target, &scan_cfg.root, "files_stats");
        write_records_csv_file(&path, &records)?;
        out::print_success(&format!("File stats written to {}", path.display()));
    }

    let Some(dest) = &cfg.destination else {
        return Ok(());
    };

    let engine = MoveEngine::new(dest, cfg.move_options());
    let outcome = engine.run(&records)?;
    out::print_move_outcome(&outcome);
    info!(
        dest = %engine.destination().display(),
        moved = outcome.moved,
        skipped = outcome.skipped,
        failed = outcome.failed,
        dry_run = outcome.dry_run,
        "Move completed"
    );

    if let Some(target) = &args.moved_csv {
        let path = report_target(target, &scan_cfg.root, "moved_files_stats");
        write_moved_csv_file(&path, &records, &outcome)?;
        out::print_success(&format!("Moved files report written to {}", path.display()));
    }
    Ok(())
}

/// A directory target gets a timestamped file name inside it.
fn report_target(target: &Path, root: &Path, kind: &str) -> PathBuf {
    if target.is_dir() {
        default_report_path(target, root, kind, Local::now())
    } else {
        target.to_path_buf()
    }
}

fn log_failure(e: &anyhow::Error) {
    let Some(fe) = e.downcast_ref::<FilerError>() else {
        error!(error = ?e, "filer failed");
        return;
    };
    let code = fe.code();
    if fe.is_recoverable() {
        // Per-item failures are normally absorbed by the scan/move loops.
        error!(code, kind = "item_failure", error = %fe, "Unexpected per-item failure aborted the run");
        return;
    }
    match fe {
        FilerError::RootNotFound(path) => {
            error!(code, kind = "root_not_found", path = %path.display(), "Scan root missing or not a directory")
        }
        FilerError::DestinationUnavailable { path, source } => {
            error!(code, kind = "destination_unavailable", path = %path.display(), error = %source, "Destination cannot be used")
        }
        FilerError::SizeNotBucketed { size } => {
            error!(code, kind = "size_not_bucketed", size = *size, "Size bucket table has a gap")
        }
        FilerError::InvalidConfig(msg) => {
            error!(code, kind = "invalid_config", %msg, "Configuration rejected")
        }
        _ => error!(code, kind = "filer_error", error = ?fe, "filer failed"),
    }
}

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use filer::cli::Args;
use filer::{Config, LogLevel, SortKey};

#[test]
fn flags_override_config_values() {
    let args = Args::parse_from([
        "filer",
        "/data/in",
        "--ext",
        "MP3,jpg",
        "-e",
        ".png",
        "--skip",
        ".git,tmp",
        "--dest",
        "/data/out/",
        "--batch-size",
        "10",
        "--batch-delay-ms",
        "0",
        "--dry-run",
        "--log-level",
        "info",
    ]);
    let mut cfg = Config::default();
    cfg.skip_folders.insert("cache".into());
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.root, PathBuf::from("/data/in"));
    assert_eq!(cfg.destination, Some(PathBuf::from("/data/out")));
    let exts: Vec<_> = cfg.extensions.iter().map(String::as_str).collect();
    assert_eq!(exts, [".jpg", ".mp3", ".png"]);
    let skips: Vec<_> = cfg.skip_folders.iter().map(String::as_str).collect();
    assert_eq!(skips, [".git", "cache", "tmp"]);
    assert_eq!(cfg.batch_size, 10);
    assert_eq!(cfg.batch_delay, Duration::ZERO);
    assert!(cfg.dry_run);
    assert_eq!(cfg.log_level, LogLevel::Info);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["filer"]);
    let mut cfg = Config::new("/from/xml");
    cfg.extensions.insert(".mkv".into());
    cfg.batch_size = 3;
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.root, PathBuf::from("/from/xml"));
    assert!(cfg.extensions.contains(".mkv"));
    assert_eq!(cfg.batch_size, 3);
    assert!(!cfg.dry_run);
}

#[test]
fn debug_flag_wins_over_log_level() {
    let args = Args::parse_from(["filer", "-d", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
}

#[test]
fn sort_key_is_parsed_and_desc_requires_it() {
    let args = Args::parse_from(["filer", "--sort", "size", "--desc"]);
    assert_eq!(args.sort, Some(SortKey::Size));
    assert!(args.desc);

    assert!(Args::try_parse_from(["filer", "--desc"]).is_err());
    assert!(Args::try_parse_from(["filer", "--sort", "colour"]).is_err());
}

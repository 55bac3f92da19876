//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request.
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are a hard error to surface misconfigurations early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use crate::config::types::{Config, LogLevel};
use crate::fs_ops::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
use crate::scan::{normalize_extensions, normalize_skips};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    root: Option<String>,
    destination: Option<String>,
    /// Comma-separated, e.g. "mp3, .jpg"
    extensions: Option<String>,
    all_files: Option<bool>,
    /// Comma-separated substrings
    skip_folders: Option<String>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    batch_size: Option<u64>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    batch_delay_ms: Option<u64>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    max_conflict_probes: Option<u64>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Optional u64 that tolerates surrounding whitespace but rejects garbage.
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config on top of defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(root) = non_empty(parsed.root.as_deref()) {
        cfg.root = PathBuf::from(root);
    }
    cfg.destination = non_empty(parsed.destination.as_deref()).map(PathBuf::from);
    if let Some(exts) = parsed.extensions.as_deref() {
        cfg.extensions = normalize_extensions([exts]);
    }
    cfg.all_files = parsed.all_files.unwrap_or(false);
    if let Some(skips) = parsed.skip_folders.as_deref() {
        cfg.skip_folders = normalize_skips([skips]);
    }
    if let Some(n) = parsed.batch_size {
        cfg.batch_size = usize::try_from(n).context("batch_size out of range")?;
    }
    if let Some(ms) = parsed.batch_delay_ms {
        cfg.batch_delay = Duration::from_millis(ms);
    }
    if let Some(n) = parsed.max_conflict_probes {
        cfg.max_conflict_probes = n;
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = match s.parse::<LogLevel>() {
            Ok(level) => level,
            Err(e) => bail!(e),
        };
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load the config at [`default_config_path`]; Ok(None) when the file does not exist.
pub fn load_config_from_xml() -> Result<Option<Config>> {
    let path = default_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(None);
    }
    load_config_from_xml_path(&path).map(Some)
}

/// Write a commented template config to `path`, creating parent directories.
/// Refuses to overwrite an existing file or to write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if path.exists() {
        bail!("Config already exists at {}", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/filer.log".into());

    let content = format!(
        "<!--\n  filer configuration (XML)\n\n  root                -> folder to scan\n  destination         -> gather matching files here (leave empty to only report)\n  extensions          -> comma list, e.g. mp3, .jpg (empty = media defaults)\n  all_files           -> true to match every file\n  skip_folders        -> comma list of path substrings to skip\n  batch_size          -> files moved per batch\n  batch_delay_ms      -> pause between batches\n  log_level           -> quiet | normal | info | debug\n  log_file            -> path to log file (optional)\n\n  CLI flags override XML values.\n-->\n<config>\n  <root>.</root>\n  <destination></destination>\n  <extensions>.mp3, .mp4, .avi, .mkv, .jpg, .jpeg, .png, .gif</extensions>\n  <all_files>false</all_files>\n  <skip_folders>.git, __pycache__, .idea, venv</skip_folders>\n  <batch_size>{}</batch_size>\n  <batch_delay_ms>{}</batch_delay_ms>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        DEFAULT_BATCH_SIZE,
        DEFAULT_BATCH_DELAY.as_millis(),
        suggested_log,
    );

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, content.as_bytes()))
        .with_context(|| format!("write template config '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_round_trips_through_loader() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested").join("config.xml");
        create_template_config(&path).unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg.root, PathBuf::from("."));
        assert!(cfg.destination.is_none());
        assert!(cfg.extensions.contains(".mkv"));
        assert!(cfg.skip_folders.contains("__pycache__"));
        assert_eq!(cfg.batch_size, DEFAULT_BATCH_SIZE);
        assert!(create_template_config(&path).is_err(), "must not overwrite");
    }

    #[test]
    fn garbage_number_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><batch_size>lots</batch_size></config>").unwrap();
        assert!(load_config_from_xml_path(&path).is_err());
    }
}

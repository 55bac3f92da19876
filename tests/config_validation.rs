use std::fs;
use tempfile::tempdir;

use filer::{Config, FilerError};

#[test]
fn missing_root_fails_with_root_not_found() {
    let td = tempdir().unwrap();
    let cfg = Config::new(td.path().join("missing"));
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err.downcast_ref::<FilerError>(), Some(FilerError::RootNotFound(_))));
}

#[test]
fn plain_root_without_destination_is_valid() {
    let td = tempdir().unwrap();
    Config::new(td.path()).validate().unwrap();
}

#[test]
fn destination_that_is_a_file_is_rejected() {
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    fs::create_dir(&root).unwrap();
    let file = td.path().join("dest.txt");
    fs::write(&file, b"x").unwrap();

    let mut cfg = Config::new(&root);
    cfg.destination = Some(file);
    assert!(cfg.validate().is_err());
}

#[test]
fn destination_containing_root_is_rejected() {
    let td = tempdir().unwrap();
    let root = td.path().join("inner");
    fs::create_dir(&root).unwrap();

    let mut cfg = Config::new(&root);
    cfg.destination = Some(td.path().to_path_buf());
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err.downcast_ref::<FilerError>(), Some(FilerError::InvalidConfig(_))));
}

#[test]
fn destination_inside_root_is_allowed_and_skipped() {
    let td = tempdir().unwrap();
    let root = fs::canonicalize(td.path()).unwrap();
    let dest = root.join("gathered");

    let mut cfg = Config::new(&root);
    cfg.destination = Some(dest.clone());
    cfg.validate().unwrap();
    let scan_cfg = cfg.scan_config();
    assert!(scan_cfg.is_skipped(&dest.to_string_lossy()));
}

#[test]
fn zero_batch_size_is_rejected() {
    let td = tempdir().unwrap();
    let mut cfg = Config::new(td.path());
    cfg.batch_size = 0;
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err.downcast_ref::<FilerError>(), Some(FilerError::InvalidConfig(_))));
}

use chrono::{Local, TimeZone};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

use filer::report::{default_report_path, write_moved_csv, write_records_csv_file};
use filer::{MoveOptions, move_records, stat_file};

const HEADER: &str = "File Name,File Type,File Size (Bytes),File Size (Human Readable),Creation Date,Modification Date,Source Folder";

#[test]
fn scan_report_has_fixed_header_and_one_row_per_record() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.mp3");
    let b = td.path().join("b.JPG");
    fs::write(&a, vec![0u8; 1536]).unwrap();
    fs::write(&b, b"x").unwrap();
    let records = vec![stat_file(&a).unwrap(), stat_file(&b).unwrap()];

    let out = td.path().join("report.csv");
    write_records_csv_file(&out, &records).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some(HEADER));
    let first = lines.next().unwrap();
    assert!(first.starts_with("a.mp3,.mp3,1536,1.50 KB,"), "row was: {first}");
    let second = lines.next().unwrap();
    assert!(second.starts_with("b.JPG,.jpg,1,1.00 B,"), "row was: {second}");
    assert!(lines.next().is_none());
}

#[test]
fn moved_report_lists_only_moved_files_with_destinations() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("keep.gif"), b"g").unwrap();
    fs::write(src.join("lost.gif"), b"l").unwrap();
    let records = vec![
        stat_file(&src.join("keep.gif")).unwrap(),
        stat_file(&src.join("lost.gif")).unwrap(),
    ];
    fs::remove_file(src.join("lost.gif")).unwrap();

    let opts = MoveOptions {
        inter_batch_delay: Duration::ZERO,
        ..Default::default()
    };
    let outcome = move_records(&records, &dest, &opts).unwrap();
    assert_eq!(outcome.failed, 1);

    let at = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    let mut buf = Vec::new();
    let rows = write_moved_csv(&mut buf, &records, &outcome, at).unwrap();
    assert_eq!(rows, 1);

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(7), Some("Moved Date"));
    assert_eq!(headers.get(8), Some("Destination Folder"));
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(row.get(0), Some("keep.gif"));
    assert_eq!(row.get(7), Some("2024-05-06 07:08:09"));
    assert_eq!(row.get(8), Some(dest.join("keep.gif").display().to_string().as_str()));
}

#[test]
fn default_report_name_uses_root_name_and_timestamp() {
    let at = Local.with_ymd_and_hms(2023, 12, 31, 23, 59, 1).unwrap();
    let p = default_report_path(
        std::path::Path::new("/reports"),
        std::path::Path::new("/home/me/Music"),
        "files_stats",
        at,
    );
    assert_eq!(
        p,
        std::path::PathBuf::from("/reports/Music_files_stats_20231231_235901.csv")
    );
}

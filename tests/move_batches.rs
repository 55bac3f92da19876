use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

use filer::{FileRecord, MoveEngine, MoveOptions, ScanConfig, move_records, scan, stat_file};

fn quick() -> MoveOptions {
    MoveOptions {
        inter_batch_delay: Duration::ZERO,
        ..Default::default()
    }
}

fn make(dir: &Path, name: &str, body: &[u8]) -> FileRecord {
    fs::create_dir_all(dir).unwrap();
    let p = dir.join(name);
    fs::write(&p, body).unwrap();
    stat_file(&p).unwrap()
}

#[test]
fn same_named_files_are_renamed_in_order() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("x.jpg"), b"existing").unwrap();

    let first = make(&src.join("a"), "x.jpg", b"first");
    let second = make(&src.join("b"), "x.jpg", b"second");

    let outcome = move_records(&[first.clone(), second.clone()], &dest, &quick()).unwrap();

    assert_eq!(outcome.moved, 2);
    assert_eq!(outcome.failed, 0);
    assert_eq!(outcome.mapping.get(&first.source_path()), Some(dest.join("x(1).jpg").as_path()));
    assert_eq!(outcome.mapping.get(&second.source_path()), Some(dest.join("x(2).jpg").as_path()));
    assert_eq!(fs::read(dest.join("x.jpg")).unwrap(), b"existing");
    assert_eq!(fs::read(dest.join("x(1).jpg")).unwrap(), b"first");
    assert_eq!(fs::read(dest.join("x(2).jpg")).unwrap(), b"second");
    assert!(!first.source_path().exists());
    assert!(!second.source_path().exists());
}

#[test]
fn destination_is_created_when_missing() {
    let td = tempdir().unwrap();
    let rec = make(&td.path().join("src"), "song.mp3", b"la");
    let dest = td.path().join("new").join("nested");

    let outcome = move_records(&[rec], &dest, &quick()).unwrap();
    assert_eq!(outcome.moved, 1);
    assert!(dest.join("song.mp3").is_file());
}

#[test]
fn file_already_at_destination_is_skipped() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    let rec = make(&dest, "here.png", b"px");

    let outcome = move_records(&[rec], &dest, &quick()).unwrap();
    assert_eq!(outcome.attempted, 1);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.moved, 0);
    assert!(outcome.mapping.is_empty());
    assert!(dest.join("here.png").is_file());
    assert!(!dest.join("here(1).png").exists());
}

#[test]
fn vanished_source_is_counted_and_run_continues() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    let gone = make(&src, "gone.mp4", b"bye");
    let kept = make(&src, "kept.mp4", b"hi");
    fs::remove_file(gone.source_path()).unwrap();

    let outcome = move_records(&[gone.clone(), kept.clone()], &dest, &quick()).unwrap();

    assert_eq!(outcome.attempted, 2);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.moved, 1);
    assert_eq!(outcome.failed_sources, vec![gone.source_path()]);
    assert_eq!(outcome.attempted, outcome.moved + outcome.skipped + outcome.failed);
    assert!(dest.join("kept.mp4").is_file());
}

#[test]
fn small_batches_move_everything_in_input_order() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    let records: Vec<FileRecord> = (0..7)
        .map(|i| make(&td.path().join(format!("d{i}")), "same.gif", format!("{i}").as_bytes()))
        .collect();
    let opts = MoveOptions {
        batch_size: 3,
        inter_batch_delay: Duration::from_millis(1),
        ..Default::default()
    };

    let outcome = MoveEngine::new(&dest, opts).run(&records).unwrap();

    assert_eq!(outcome.moved, 7);
    assert_eq!(outcome.mapping.len(), 7);
    let order: Vec<_> = outcome.mapping.iter().map(|(s, _)| s.to_path_buf()).collect();
    let expected: Vec<_> = records.iter().map(|r| r.source_path()).collect();
    assert_eq!(order, expected, "mapping keeps input order across batches");
    // The first file keeps its name; later ones count up.
    assert_eq!(fs::read(dest.join("same.gif")).unwrap(), b"0");
    assert_eq!(fs::read(dest.join("same(6).gif")).unwrap(), b"6");
}

#[test]
fn pause_happens_between_batches_but_not_after_the_last() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    let records: Vec<FileRecord> = (0..4)
        .map(|i| make(&td.path().join("src"), &format!("f{i}.mp3"), b"x"))
        .collect();
    let opts = MoveOptions {
        batch_size: 2,
        inter_batch_delay: Duration::from_millis(300),
        ..Default::default()
    };

    let started = Instant::now();
    let outcome = MoveEngine::new(&dest, opts).run(&records).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome.moved, 4);
    assert!(elapsed >= Duration::from_millis(300), "one pause expected, took {elapsed:?}");
    assert!(elapsed < Duration::from_millis(600), "no pause after the last batch, took {elapsed:?}");
}

#[test]
fn file_in_place_is_skipped_when_destination_is_spelled_differently() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    fs::create_dir_all(dest.join("sub")).unwrap();
    let rec = make(&dest, "x.jpg", b"here");
    // Same folder, different spelling.
    let alias = dest.join("sub").join("..");

    let outcome = move_records(&[rec], &alias, &quick()).unwrap();

    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.moved, 0);
    assert!(dest.join("x.jpg").is_file());
    assert!(!dest.join("x(1).jpg").exists());
}

#[cfg(unix)]
#[test]
fn file_in_place_is_skipped_through_symlinked_destination() {
    use std::os::unix::fs::symlink;

    let td = tempdir().unwrap();
    let real = td.path().join("real");
    let rec = make(&real, "song.mp3", b"la");
    let link = td.path().join("link");
    symlink(&real, &link).unwrap();

    let outcome = move_records(&[rec], &link, &quick()).unwrap();

    assert_eq!(outcome.skipped, 1);
    assert!(!real.join("song(1).mp3").exists());
}

#[test]
fn zero_batch_size_behaves_like_one() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    let rec = make(&td.path().join("src"), "a.avi", b"a");
    let opts = MoveOptions {
        batch_size: 0,
        ..quick()
    };
    let outcome = MoveEngine::new(&dest, opts).run(&[rec]).unwrap();
    assert_eq!(outcome.moved, 1);
}

#[test]
fn dry_run_plans_distinct_names_without_touching_disk() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    let a = make(&td.path().join("a"), "clip.mkv", b"a");
    let b = make(&td.path().join("b"), "clip.mkv", b"b");
    let opts = MoveOptions {
        dry_run: true,
        ..quick()
    };

    let outcome = MoveEngine::new(&dest, opts).run(&[a.clone(), b.clone()]).unwrap();

    assert!(outcome.dry_run);
    assert_eq!(outcome.moved, 2);
    assert_eq!(outcome.mapping.get(&a.source_path()), Some(dest.join("clip.mkv").as_path()));
    assert_eq!(outcome.mapping.get(&b.source_path()), Some(dest.join("clip(1).mkv").as_path()));
    assert!(!dest.exists(), "dry-run must not create the destination");
    assert!(a.source_path().is_file());
    assert!(b.source_path().is_file());
}

#[test]
fn filtered_run_only_moves_matching_names() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest");
    let src = td.path().join("src");
    let keep = make(&src, "keep.mp3", b"k");
    let leave = make(&src, "leave.txt", b"l");

    let cfg = ScanConfig::new(&src).with_extensions([".mp3"]);
    let outcome = MoveEngine::new(&dest, quick())
        .run_filtered(&[keep.clone(), leave.clone()], cfg.classifier())
        .unwrap();

    assert_eq!(outcome.attempted, 1);
    assert!(outcome.mapping.get(&keep.source_path()).is_some());
    assert!(leave.source_path().is_file());
}

#[test]
fn rescan_of_destination_matches_moved_files() {
    let td = tempdir().unwrap();
    let root = fs::canonicalize(td.path()).unwrap().join("root");
    let dest = fs::canonicalize(td.path()).unwrap().join("dest");
    fs::create_dir_all(root.join("x")).unwrap();
    fs::create_dir_all(root.join("y")).unwrap();
    fs::write(root.join("x").join("one.jpg"), vec![1u8; 11]).unwrap();
    fs::write(root.join("y").join("two.png"), vec![2u8; 22]).unwrap();
    fs::write(root.join("y").join("skip.txt"), b"t").unwrap();

    let cfg = ScanConfig::new(&root).with_extensions([".jpg", ".png"]);
    let before = scan(&cfg).unwrap();
    let outcome = move_records(&before, &dest, &quick()).unwrap();
    assert_eq!(outcome.moved, 2);
    assert_eq!(outcome.moved_bytes, 33);

    let after = scan(&ScanConfig::new(&dest).with_extensions([".jpg", ".png"])).unwrap();
    let expect: HashSet<_> = before.iter().map(|r| (r.name.clone(), r.size_bytes)).collect();
    let got: HashSet<_> = after.iter().map(|r| (r.name.clone(), r.size_bytes)).collect();
    assert_eq!(got, expect);
    assert!(root.join("y").join("skip.txt").is_file());
}

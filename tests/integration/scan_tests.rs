use basedupe::duplicates::{DuplicateFinder, FinderConfig, FinderError, ScanPhase};
use basedupe::scanner::Fingerprinter;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_search_copy_attaches_to_base_file() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base");
    let search = dir.path().join("search");
    write(&base.join("a.txt"), b"hi");
    write(&search.join("b.txt"), b"hi");

    let mut finder = DuplicateFinder::with_defaults();
    let (base_summary, search_summary) = finder.find_duplicates(&base, false, &search, false).unwrap();

    let groups: Vec<_> = finder.index().groups().collect();
    assert_eq!(groups.len(), 1);
    let (fp, record) = groups[0];
    assert_eq!(fp.size, 2);
    assert_eq!(record.canonical_path, base.join("a.txt"));
    assert_eq!(record.duplicate_paths, vec![search.join("b.txt")]);

    assert_eq!(base_summary.counters.base_unique_count, 1);
    assert_eq!(base_summary.counters.base_duplicate_count, 0);
    assert_eq!(search_summary.counters.files_processed, 1);
    assert_eq!(search_summary.counters.base_duplicate_count, 1);
}

#[test]
fn test_duplicate_within_base() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("x.txt"), b"same bytes");
    write(&dir.path().join("y.txt"), b"same bytes");

    let mut finder = DuplicateFinder::with_defaults();
    let summary = finder.run_scan(dir.path(), false, ScanPhase::Base).unwrap();

    assert_eq!(summary.counters.base_unique_count, 1);
    assert_eq!(summary.counters.base_duplicate_count, 1);
    assert_eq!(finder.index().len(), 1);
    let record = finder
        .index()
        .find_canonical(&dir.path().join("x.txt"))
        .unwrap();
    assert_eq!(record.duplicate_paths, vec![dir.path().join("y.txt")]);
}

#[test]
fn test_empty_file_is_skipped() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("empty.txt"), b"");

    let mut finder = DuplicateFinder::with_defaults();
    let summary = finder.run_scan(dir.path(), false, ScanPhase::Base).unwrap();

    assert_eq!(summary.counters.files_processed, 0);
    assert_eq!(summary.counters.empty_or_oversized_skipped, 1);
    assert!(finder.index().is_empty());
}

#[test]
fn test_unmatched_search_file_changes_nothing() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base");
    let search = dir.path().join("search");
    write(&base.join("a.txt"), b"base content");
    write(&search.join("other.txt"), b"something else");

    let mut finder = DuplicateFinder::with_defaults();
    let (_, search_summary) = finder.find_duplicates(&base, true, &search, true).unwrap();

    assert_eq!(search_summary.counters.files_processed, 1);
    assert_eq!(search_summary.counters.base_duplicate_count, 0);
    assert_eq!(finder.index().len(), 1);
    assert_eq!(finder.index().groups().count(), 0);
}

#[test]
fn test_non_recursive_base_ignores_subfolders() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("top.txt"), b"top");
    write(&dir.path().join("sub").join("nested.txt"), b"nested");

    let mut finder = DuplicateFinder::with_defaults();
    let summary = finder.run_scan(dir.path(), false, ScanPhase::Base).unwrap();

    assert_eq!(summary.counters.files_processed, 1);
    assert_eq!(summary.counters.subfolders_visited, 0);
    assert!(finder
        .index()
        .find_canonical(&dir.path().join("sub").join("nested.txt"))
        .is_none());
}

#[test]
fn test_recursive_base_counts_subfolders() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a").join("b").join("deep.txt"), b"deep");
    write(&dir.path().join("c").join("shallow.txt"), b"shallow");

    let mut finder = DuplicateFinder::with_defaults();
    let summary = finder.run_scan(dir.path(), true, ScanPhase::Base).unwrap();

    assert_eq!(summary.counters.files_processed, 2);
    assert_eq!(summary.counters.subfolders_visited, 3);
}

#[test]
fn test_git_folder_never_scanned() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base");
    let search = dir.path().join("search");
    write(&base.join("keep.txt"), b"payload");
    write(&search.join(".Git").join("objects").join("blob"), b"payload");
    write(&search.join(".git").join("HEAD"), b"payload");

    let mut finder = DuplicateFinder::with_defaults();
    let (_, search_summary) = finder.find_duplicates(&base, true, &search, true).unwrap();

    assert_eq!(search_summary.counters.files_processed, 0);
    assert_eq!(search_summary.counters.subfolders_visited, 0);
    assert_eq!(finder.index().groups().count(), 0);
}

#[test]
fn test_custom_exclusion() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("node_modules").join("pkg.js"), b"js");
    write(&dir.path().join("src").join("main.js"), b"main");

    let config = FinderConfig::default()
        .with_excluded_dirs(vec![".git".into(), "NODE_MODULES".into()]);
    let mut finder = DuplicateFinder::new(config);
    let summary = finder.run_scan(dir.path(), true, ScanPhase::Base).unwrap();

    assert_eq!(summary.counters.files_processed, 1);
    assert_eq!(summary.counters.subfolders_visited, 1);
}

#[test]
fn test_size_limit_is_exclusive() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("under.bin"), &[1u8; 99]);
    write(&dir.path().join("at.bin"), &[2u8; 100]);
    write(&dir.path().join("over.bin"), &[3u8; 101]);

    let config = FinderConfig::default().with_max_file_size(100);
    let mut finder = DuplicateFinder::new(config);
    let summary = finder.run_scan(dir.path(), false, ScanPhase::Base).unwrap();

    assert_eq!(summary.counters.files_processed, 1);
    assert_eq!(summary.counters.bytes_processed, 99);
    assert_eq!(summary.counters.empty_or_oversized_skipped, 2);
}

#[test]
fn test_base_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("one.txt"), b"1");
    write(&dir.path().join("two.txt"), b"2");
    write(&dir.path().join("copy.txt"), b"1");
    write(&dir.path().join("sub").join("three.txt"), b"3");

    let run = || {
        let mut finder = DuplicateFinder::with_defaults();
        let summary = finder.run_scan(dir.path(), true, ScanPhase::Base).unwrap();
        let canonicals: Vec<_> = finder
            .index()
            .records()
            .map(|(_, r)| r.canonical_path.clone())
            .collect();
        (summary.counters.base_unique_count, canonicals)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_first_base_file_in_walk_order_is_canonical() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("b.txt"), b"dup");
    write(&dir.path().join("a.txt"), b"dup");

    let mut finder = DuplicateFinder::with_defaults();
    finder.run_scan(dir.path(), false, ScanPhase::Base).unwrap();

    let (_, record) = finder.index().groups().next().unwrap();
    assert_eq!(record.canonical_path, dir.path().join("a.txt"));
    assert_eq!(record.duplicate_paths, vec![dir.path().join("b.txt")]);
}

#[test]
fn test_search_before_base_is_refused() {
    let dir = tempdir().unwrap();
    let mut finder = DuplicateFinder::with_defaults();
    let err = finder
        .run_scan(dir.path(), false, ScanPhase::Search)
        .unwrap_err();
    assert!(matches!(err, FinderError::PhaseOrder { .. }));
}

#[test]
fn test_fingerprint_matches_index_key() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"hi");

    let mut finder = DuplicateFinder::with_defaults();
    finder.run_scan(dir.path(), false, ScanPhase::Base).unwrap();

    let fp = Fingerprinter::default()
        .fingerprint_path(&dir.path().join("a.txt"))
        .unwrap();
    assert!(finder.index().contains(&fp));
    assert_eq!(
        fp.key(),
        "0000000000028f434346648f6b96df89dda901c5176b10a6d83961dd3c1ac88b59b2dc327aa4"
    );
}

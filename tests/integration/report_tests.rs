use basedupe::duplicates::DuplicateFinder;
use basedupe::output::{JsonOutput, ReportWriter};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_report_blocks_follow_base_order() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base");
    let search = dir.path().join("search");
    fs::create_dir_all(&base).unwrap();
    fs::create_dir_all(&search).unwrap();
    fs::write(base.join("1-first.txt"), "first").unwrap();
    fs::write(base.join("2-second.txt"), "second").unwrap();
    fs::write(base.join("3-unique.txt"), "unique").unwrap();
    fs::write(search.join("a.txt"), "second").unwrap();
    fs::write(search.join("b.txt"), "first").unwrap();
    fs::write(search.join("c.txt"), "second").unwrap();

    let mut finder = DuplicateFinder::with_defaults();
    finder.find_duplicates(&base, false, &search, false).unwrap();
    let text = ReportWriter::new(finder.index()).render();

    let expected = format!(
        "Base File:    \"{}\"\n  - Duplicate:\"{}\"\n\nBase File:    \"{}\"\n  - Duplicate:\"{}\"\n  - Duplicate:\"{}\"\n\n",
        base.join("1-first.txt").display(),
        search.join("b.txt").display(),
        base.join("2-second.txt").display(),
        search.join("a.txt").display(),
        search.join("c.txt").display(),
    );
    assert_eq!(text, expected);
}

#[test]
fn test_report_file_and_json_agree() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base");
    let search = dir.path().join("search");
    fs::create_dir_all(base.join("nested")).unwrap();
    fs::create_dir_all(&search).unwrap();
    fs::write(base.join("nested").join("photo.jpg"), [7u8; 512]).unwrap();
    fs::write(search.join("photo copy.jpg"), [7u8; 512]).unwrap();

    let mut finder = DuplicateFinder::with_defaults();
    let (b, s) = finder.find_duplicates(&base, true, &search, true).unwrap();

    let log_path = dir.path().join("report.log");
    ReportWriter::new(finder.index()).write_file(&log_path).unwrap();
    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("photo copy.jpg\"\n"));

    let json = JsonOutput::new(finder.index(), &b, &s);
    assert_eq!(json.groups.len(), 1);
    assert_eq!(json.groups[0].size, 512);
    assert_eq!(json.groups[0].duplicates.len(), 1);
    assert!(json.groups[0].fingerprint.starts_with("000000000512"));
}

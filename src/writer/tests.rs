use super::*;
use crate::grouping::{Assignment, CategoryPair, Group, GroupOrigin, GroupingConfig, MinSize};
use std::io::Read;
use std::sync::Arc;
use tempfile::TempDir;
use zip::ZipArchive;

fn make_record(headers: &Arc<[String]>, nim: &str, category: &str) -> Record {
    Record::new(headers.clone(), vec![nim.to_string(), category.to_string()])
}

fn make_assignment() -> Assignment<Record> {
    let headers: Arc<[String]> = vec!["NIM".to_string(), "KELOMPOK".to_string()].into();
    let mut assignment = Assignment::empty(&CategoryPair::default());

    assignment.strata[0].groups = vec![
        Group::new(
            vec![
                make_record(&headers, "1", "L"),
                make_record(&headers, "2", "L"),
                make_record(&headers, "3", "L"),
            ],
            GroupOrigin::WholeUnit,
        ),
        Group::new(vec![make_record(&headers, "4", "L")], GroupOrigin::Forced),
    ];
    assignment.strata[1].groups = vec![Group::new(
        vec![
            make_record(&headers, "5", "P"),
            make_record(&headers, "6", "P"),
        ],
        GroupOrigin::ComplementPair,
    )];
    assignment
}

#[test]
fn test_assemble_numbers_per_category() {
    let sheets = assemble(make_assignment(), MinSize::AtLeast(2));

    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["L1", "L2", "P1"]);
    assert_eq!(sheets[1].number, 2);
    assert_eq!(sheets[2].category, "P");
}

#[test]
fn test_assemble_flags_undersized_groups() {
    let sheets = assemble(make_assignment(), MinSize::AtLeast(2));

    assert!(sheets[0].meets_minimum);
    assert!(!sheets[1].meets_minimum);
    assert!(sheets[2].meets_minimum);

    // The merge-all sentinel only flags empty groups
    let sheets = assemble(make_assignment(), MinSize::MergeAll);
    assert!(sheets.iter().all(|s| s.meets_minimum));
}

#[test]
fn test_manifest_stats_follow_sheets() {
    let sheets = assemble(make_assignment(), MinSize::AtLeast(2));
    let mut manifest = Manifest::new(GroupingConfig::default(), vec![]);
    manifest.set_sheets(sheets.iter().map(Sheet::summary).collect());

    assert_eq!(
        manifest.stats,
        ManifestStats {
            sheet_count: 3,
            record_count: 6,
            undersized_count: 1,
        }
    );
    assert_eq!(manifest.sheets[1].origin, GroupOrigin::Forced);
}

#[test]
fn test_archive_path() {
    assert_eq!(
        WorkbookWriter::archive_path("mentoring"),
        std::path::PathBuf::from("mentoring.zip")
    );
    assert_eq!(
        WorkbookWriter::archive_path("out/groups.ZIP"),
        std::path::PathBuf::from("out/groups.ZIP")
    );
}

#[test]
fn test_workbook_contains_sheets_and_manifest() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mentoring.zip");
    let sheets = assemble(make_assignment(), MinSize::AtLeast(2));

    let manifest = Manifest::new(
        GroupingConfig::new(3, 2).unwrap(),
        vec![InputDigest {
            path: "roster.csv".to_string(),
            sha256: "abc".to_string(),
            records: 6,
        }],
    );
    let mut writer = WorkbookWriter::new(&path, manifest);
    writer.write(&sheets).unwrap();

    let mut archive = ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["L1.csv", "L2.csv", "P1.csv", "manifest.json"]);

    let mut l1 = String::new();
    archive
        .by_name("L1.csv")
        .unwrap()
        .read_to_string(&mut l1)
        .unwrap();
    assert_eq!(l1, "NIM,KELOMPOK\n1,L\n2,L\n3,L\n");

    let mut manifest = String::new();
    archive
        .by_name("manifest.json")
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(manifest["parameters"]["target_size"], 3);
    assert_eq!(manifest["parameters"]["min_size"], 2);
    assert_eq!(manifest["stats"]["undersized_count"], 1);
    assert_eq!(manifest["sheets"][1]["origin"], "forced");
    assert_eq!(manifest["inputs"][0]["path"], "roster.csv");
}

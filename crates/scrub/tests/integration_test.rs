//! Integration tests for Scrub.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use scrub::chart::{eligible_columns, ChartData};
use scrub::output::{to_csv_string, write_delimited_file};
use scrub::{
    ChartKind, ChartRequest, CleaningOptions, ColumnType, Dataset, Parser, Scrub, ScrubError,
    Stage,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Members with one case-differing duplicate, one missing age, one outlier
/// age and dates in two layouts.
const MEMBERS: &str = "Name,Age,Join Date\n\
                       Alice,30,2023-01-15\n\
                       Bob,25,2022-06-01\n\
                       bob,25,2022-06-01\n\
                       Carol,,2021-03-20\n\
                       Dave,28,30/11/2020\n\
                       Eve,32,2019-08-08\n\
                       Frank,200,2023-05-05\n";

fn column_strings(data: &Dataset, name: &str) -> Vec<String> {
    let column = data.column(name).expect("column exists");
    (0..data.row_count()).map(|row| column.data.render(row)).collect()
}

// =============================================================================
// End-to-End Cleaning
// =============================================================================

#[test]
fn test_end_to_end_all_stages() {
    let file = create_test_file(MEMBERS);
    let scrub = Scrub::new();
    let mut session = scrub.load(file.path()).expect("Load failed");

    let outcome = scrub
        .clean_session(&mut session, &CleaningOptions::all())
        .expect("Cleaning failed");
    let cleaned = &outcome.dataset;

    assert_eq!(cleaned.column_names(), vec!["name", "age", "join_date"]);
    assert_eq!(cleaned.row_count(), 5);
    assert_eq!(
        column_strings(cleaned, "name"),
        vec!["Alice", "Bob", "Carol", "Dave", "Eve"]
    );
    // Carol's age is round(mean(30, 25, 28, 32, 200)) = 63
    assert_eq!(column_strings(cleaned, "age"), vec!["30", "25", "63", "28", "32"]);
    assert_eq!(
        column_strings(cleaned, "join_date"),
        vec![
            "2023-01-15",
            "2022-06-01",
            "2021-03-20",
            "2020-11-30",
            "2019-08-08"
        ]
    );

    let age = cleaned.column("age").unwrap();
    assert_eq!(age.column_type(), ColumnType::Integer);
    let joined = cleaned.column("join_date").unwrap();
    assert_eq!(joined.column_type(), ColumnType::Date);

    let report = &outcome.report;
    assert_eq!(report.rows_before, 7);
    assert_eq!(report.rows_after, 5);
    assert_eq!(report.stage(Stage::Deduplicate).unwrap().rows_removed(), 1);
    assert_eq!(report.stage(Stage::RemoveOutliers).unwrap().rows_removed(), 1);
    assert_eq!(report.stages_run(), Stage::ORDER.to_vec());
}

#[test]
fn test_original_is_never_modified() {
    let scrub = Scrub::new();
    let mut session = scrub
        .load_upload("members.csv", MEMBERS.as_bytes())
        .unwrap();
    let before = session.original().clone();

    scrub
        .clean_session(&mut session, &CleaningOptions::all())
        .unwrap();

    assert_eq!(session.original(), &before);
    assert_eq!(session.original_preview(10).rows.len(), 7);
    assert_eq!(session.cleaned_preview(10).unwrap().rows.len(), 5);
}

#[test]
fn test_no_stages_is_identity() {
    let scrub = Scrub::new();
    let session = scrub
        .load_upload("members.csv", MEMBERS.as_bytes())
        .unwrap();
    let outcome = scrub
        .clean(session.original(), &CleaningOptions::default())
        .unwrap();

    assert_eq!(&outcome.dataset, session.original());
    assert!(outcome.report.stages.is_empty());
}

#[test]
fn test_outliers_need_numeric_columns() {
    // Without type conversion the dates stay text and the numeric-looking
    // age text still counts as numeric. Carol has no age, so her row fails
    // the fence test along with Frank's.
    let options = CleaningOptions {
        remove_outliers: true,
        ..CleaningOptions::default()
    };
    let outcome = Scrub::new()
        .clean(
            &Parser::new()
                .parse_upload("members.csv", MEMBERS.as_bytes())
                .unwrap()
                .0,
            &options,
        )
        .unwrap();
    assert_eq!(outcome.dataset.row_count(), 5);

    let names: Vec<String> = (0..5)
        .filter_map(|row| outcome.dataset.column("Name").unwrap().data.value_string(row))
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "bob", "Dave", "Eve"]);
}

#[test]
fn test_imputing_empty_text_column_fails() {
    let content = "name,notes\nAlice,\nBob,\n";
    let scrub = Scrub::new();
    let mut session = scrub.load_upload("notes.csv", content.as_bytes()).unwrap();

    let options = CleaningOptions {
        handle_missing: true,
        ..CleaningOptions::default()
    };
    let result = scrub.clean_session(&mut session, &options);

    match result {
        Err(ScrubError::NoFillValue { column }) => assert_eq!(column, "notes"),
        other => panic!("expected NoFillValue, got {:?}", other.map(|o| o.dataset.clone())),
    }
    assert!(session.cleaned().is_none());
}

#[test]
fn test_option_order_is_irrelevant() {
    let options: CleaningOptions = serde_json::from_str(
        r#"{"removeOutliers": true, "convertTypes": true, "standardizeColumns": true}"#,
    )
    .unwrap();
    let outcome = Scrub::new()
        .clean(
            &Parser::new()
                .parse_upload("members.csv", MEMBERS.as_bytes())
                .unwrap()
                .0,
            &options,
        )
        .unwrap();

    assert_eq!(
        outcome.report.stages_run(),
        vec![Stage::NormalizeColumns, Stage::ConvertTypes, Stage::RemoveOutliers]
    );
}

// =============================================================================
// Ingestion
// =============================================================================

#[test]
fn test_malformed_upload_is_rejected() {
    let content = "a,b\n1,2\n3,4,5\n";
    let result = Scrub::new().load_upload("bad.csv", content.as_bytes());
    assert!(matches!(result, Err(ScrubError::Parse { row: 2, .. })));
}

#[test]
fn test_empty_upload_is_rejected() {
    let result = Scrub::new().load_upload("empty.csv", b"");
    assert!(result.is_err());
}

#[test]
fn test_source_metadata() {
    let file = create_test_file(MEMBERS);
    let session = Scrub::new().load(file.path()).unwrap();
    let source = session.source();

    assert_eq!(source.row_count, 7);
    assert_eq!(source.column_count, 3);
    assert_eq!(source.format, "csv");
    assert!(source.hash.starts_with("sha256:"));
    assert_eq!(source.size_bytes, MEMBERS.len() as u64);
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_blank_cells_survive_round_trip_after_dedup() {
    let content = "name,note\nAnn, \nBen,x\n";
    let scrub = Scrub::new();
    let mut session = scrub.load_upload("notes.csv", content.as_bytes()).unwrap();
    let options = CleaningOptions {
        drop_duplicates: true,
        ..CleaningOptions::default()
    };
    scrub.clean_session(&mut session, &options).unwrap();

    let cleaned = session.cleaned().unwrap();
    assert_eq!(cleaned.row(0).unwrap(), vec!["Ann", "NaN"]);

    let csv = to_csv_string(cleaned).unwrap();
    let (reloaded, _) = Parser::new().parse_upload("notes.csv", csv.as_bytes()).unwrap();
    assert_eq!(
        reloaded.rows().collect::<Vec<_>>(),
        cleaned.rows().collect::<Vec<_>>()
    );
}

#[test]
fn test_round_trip_through_csv() {
    let content = "city,score,visited\n\
                   Paris,2.5,2023-01-01\n\
                   Oslo,,2023-02-15\n\
                   Rome,4.0,bad\n";
    let scrub = Scrub::new();
    let mut session = scrub.load_upload("cities.csv", content.as_bytes()).unwrap();
    let options = CleaningOptions {
        convert_types: true,
        ..CleaningOptions::default()
    };
    scrub.clean_session(&mut session, &options).unwrap();

    let csv = session.download_csv().unwrap().unwrap();
    assert_eq!(
        csv,
        "city,score,visited\nParis,2.5,2023-01-01\nOslo,NaN,2023-02-15\nRome,4.0,NaN\n"
    );

    let (reloaded, _) = Parser::new()
        .parse_upload("cleaned_data.csv", csv.as_bytes())
        .unwrap();
    let cleaned = session.cleaned().unwrap();
    assert_eq!(reloaded.column_names(), cleaned.column_names());
    assert_eq!(
        reloaded.rows().collect::<Vec<_>>(),
        cleaned.rows().collect::<Vec<_>>()
    );
}

#[test]
fn test_write_file_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cleaned.tsv");

    let (data, _) = Parser::new()
        .parse_upload("members.csv", MEMBERS.as_bytes())
        .unwrap();
    write_delimited_file(&data, &path, b'\t').unwrap();

    let session = Scrub::new().load(&path).unwrap();
    assert_eq!(session.source().format, "tsv");
    assert_eq!(session.original(), &data);
    assert_eq!(to_csv_string(session.original()).unwrap(), to_csv_string(&data).unwrap());
}

// =============================================================================
// Charts
// =============================================================================

#[test]
fn test_charts_on_cleaned_members() {
    let scrub = Scrub::new();
    let mut session = scrub
        .load_upload("members.csv", MEMBERS.as_bytes())
        .unwrap();
    scrub
        .clean_session(&mut session, &CleaningOptions::all())
        .unwrap();
    let cleaned = session.cleaned().unwrap();

    assert_eq!(eligible_columns(cleaned, ChartKind::Bar), vec!["name", "join_date"]);
    assert_eq!(eligible_columns(cleaned, ChartKind::Histogram), vec!["age"]);
    assert!(eligible_columns(cleaned, ChartKind::Scatter).is_empty());

    let chart = session
        .chart(&ChartRequest::new(ChartKind::Histogram, "age"))
        .unwrap()
        .unwrap();
    match chart.data {
        ChartData::Histogram { bins } => {
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        }
        other => panic!("unexpected chart data {:?}", other),
    }

    let refused = session.chart(&ChartRequest::new(ChartKind::Scatter, "age"));
    assert!(matches!(
        refused,
        Err(ScrubError::NoEligibleColumns {
            kind: ChartKind::Scatter
        })
    ));
}

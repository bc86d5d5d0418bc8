//! Tests for the conversion pipeline

use super::*;
use crate::Error;
use crate::app::services::composition_lookup::CompositionLookup;
use crate::app::services::converter::{
    Converter, MetadataSource, SilentObserver, gdb8_15_dataset_metadata,
};
use crate::app::services::feedstock_validator::{MemorySink, Validator};
use crate::app::services::tab_parser::{ColumnPolicy, Separator};
use crate::config::Config;
use serde_json::{Value, json};
use tempfile::TempDir;

fn open_validator(sink: &mut MemorySink) -> Validator<&mut MemorySink> {
    Validator::from_metadata(&gdb8_15_dataset_metadata(), sink).unwrap()
}

#[test]
fn test_convert_text_writes_enriched_records_in_order() {
    let raw = create_spectra_text(3);
    let compositions = create_compositions(3);
    let mut sink = MemorySink::new();

    let report = Converter::new(Config::default())
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut sink),
            &SilentObserver,
        )
        .unwrap();

    assert_eq!(report.records_parsed, 3);
    assert_eq!(report.records_accepted, 3);
    assert!(report.is_complete());
    assert_eq!(report.source_name, "gdb8-15");

    assert!(sink.is_finished());
    assert_eq!(sink.dataset.as_ref().unwrap()["mdf-resource_type"], json!("dataset"));
    assert_eq!(sink.records.len(), 3);

    let first = &sink.records[0];
    assert_eq!(first["mdf-title"], json!("gdb8-15 - record: 1"));
    assert_eq!(first["mdf-acl"], json!(["public"]));
    assert_eq!(first["mdf-composition"], json!("C1H2"));
    assert_eq!(first["mdf-resource_type"], json!("record"));
    assert_eq!(
        first["mdf-links"]["mdf-landing_page"],
        json!("https://data.materialsdatafacility.org/collections/gdb-8-15/gdb8_22k_elec_spec.txt#1")
    );

    let raw_record: Value = serde_json::from_str(first["mdf-raw"].as_str().unwrap()).unwrap();
    assert_eq!(raw_record["Index"], json!("1"));
    assert_eq!(raw_record["E1-CC2"], json!("0.43295186"));
    assert_eq!(raw_record["E2-CC2"], json!("0.43295958"));
    // The repeated PBE0 block collapses onto the first block's keys
    assert_eq!(raw_record.as_object().unwrap().len(), 13);

    assert_eq!(sink.records[2]["mdf-composition"], json!("C3H6"));
}

#[test]
fn test_records_inherit_dataset_context() {
    let raw = create_spectra_text(1);
    let compositions = create_compositions(1);
    let mut sink = MemorySink::new();

    Converter::new(Config::default())
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut sink),
            &SilentObserver,
        )
        .unwrap();

    let record = &sink.records[0];
    assert_eq!(record["mdf-source_name"], json!("gdb8-15"));
    assert_eq!(record["mdf-year"], json!(2015));
    assert_eq!(record["mdf-collection"], json!("gdb8-15"));
    assert_eq!(record["mdf-data_contact"]["family_name"], json!("von Lilienfeld"));
}

#[test]
fn test_out_of_range_composition_is_fatal() {
    let raw = create_spectra_text(3);
    let compositions = create_compositions(1);
    assert_eq!(compositions.len(), 2);
    let mut sink = MemorySink::new();

    let result = Converter::new(Config::default()).convert_text(
        source_path(),
        &raw,
        &compositions,
        open_validator(&mut sink),
        &SilentObserver,
    );

    assert!(matches!(
        result,
        Err(Error::CompositionIndex {
            index: 2,
            offset: 0,
            available: 2
        })
    ));
    // The record before the bad index is already written
    assert_eq!(sink.records.len(), 1);
    assert!(!sink.is_finished());
}

#[test]
fn test_unparseable_index_rejects_only_that_record() {
    let mut raw = create_spectra_text(2);
    raw.push_str(&spectra_row(3).replacen('3', "x", 1));
    raw.push('\n');
    raw.push_str(&spectra_row(4));
    let compositions = create_compositions(4);
    let mut sink = MemorySink::new();

    let report = Converter::new(Config::default())
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut sink),
            &SilentObserver,
        )
        .unwrap();

    assert_eq!(report.records_parsed, 4);
    assert_eq!(report.records_accepted, 3);
    assert_eq!(report.records_rejected, 1);
    assert!(report.messages[0].contains("'x'"));
    assert_eq!(sink.records[2]["mdf-title"], json!("gdb8-15 - record: 4"));
}

#[test]
fn test_rejections_name_source_file_lines() {
    // Preamble lines, then rows 1 and 2, a blank line, and two bad rows
    let mut raw = create_spectra_text(2);
    raw.push('\n');
    raw.push_str(&spectra_row(3).replacen('3', "x", 1));
    raw.push('\n');
    raw.push_str("4      0.1     0.2\n");
    let compositions = create_compositions(4);
    let mut sink = MemorySink::new();

    let report = Converter::new(Config::default())
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut sink),
            &SilentObserver,
        )
        .unwrap();

    let bad_index_line = PREAMBLE.lines().count() + 4;
    assert_eq!(report.records_failed(), 2);
    assert!(
        report.messages[0].starts_with(&format!("Invalid record on line {}:", bad_index_line)),
        "got {:?}",
        report.messages
    );
    assert!(
        report.messages[1].starts_with(&format!("Line {}:", bad_index_line + 1)),
        "got {:?}",
        report.messages
    );
}

#[test]
fn test_short_line_is_per_record_failure_under_strict_policy() {
    let mut raw = create_spectra_text(2);
    raw.push_str("3      0.1     0.2\n");
    raw.push_str(&spectra_row(4));
    let compositions = create_compositions(4);
    let mut sink = MemorySink::new();

    let report = Converter::new(Config::default())
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut sink),
            &SilentObserver,
        )
        .unwrap();

    assert_eq!(report.parse_failures, 1);
    assert_eq!(report.records_accepted, 3);
    assert_eq!(report.records_failed(), 1);
    assert!(report.messages[0].contains("expected 17 fields, found 3"));
}

#[test]
fn test_short_line_is_padded_under_lenient_policy() {
    let mut raw = create_spectra_text(1);
    raw.push_str("2      0.1     0.2\n");
    let compositions = create_compositions(2);
    let mut sink = MemorySink::new();

    let config = Config {
        column_policy: ColumnPolicy::Lenient,
        ..Config::default()
    };
    let report = Converter::new(config)
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut sink),
            &SilentObserver,
        )
        .unwrap();

    assert_eq!(report.records_accepted, 2);
    let raw_record: Value =
        serde_json::from_str(sink.records[1]["mdf-raw"].as_str().unwrap()).unwrap();
    assert_eq!(raw_record["E2-CC2"], json!("0.2"));
    assert_eq!(raw_record["f2-CAM"], json!(""));
}

#[test]
fn test_whitespace_separator_tolerates_column_drift() {
    // Four-space gaps do not split under the five-space literal
    let mut raw = create_spectra_text(1);
    raw.push_str(&spectra_row(2).replace("     ", "    "));
    raw.push('\n');
    let compositions = create_compositions(2);

    let mut literal_sink = MemorySink::new();
    let literal = Converter::new(Config::default())
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut literal_sink),
            &SilentObserver,
        )
        .unwrap();
    assert_eq!(literal.parse_failures, 1);

    let mut whitespace_sink = MemorySink::new();
    let config = Config {
        separator: Separator::Whitespace,
        ..Config::default()
    };
    let whitespace = Converter::new(config)
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut whitespace_sink),
            &SilentObserver,
        )
        .unwrap();
    assert_eq!(whitespace.records_accepted, 2);
    assert_eq!(whitespace_sink.records[0], literal_sink.records[0]);
}

#[test]
fn test_missing_marker_is_invalid_format() {
    let raw = format!("{}{}\n", PREAMBLE, spectra_row(2));
    let compositions = create_compositions(2);
    let mut sink = MemorySink::new();

    let result = Converter::new(Config::default()).convert_text(
        source_path(),
        &raw,
        &compositions,
        open_validator(&mut sink),
        &SilentObserver,
    );

    assert!(matches!(result, Err(Error::InvalidFormat { .. })));
    assert!(sink.records.is_empty());
}

#[test]
fn test_observer_sees_every_lifecycle_point() {
    let mut raw = create_spectra_text(2);
    raw.push_str("3      0.1\n");
    let compositions = create_compositions(3);
    let mut sink = MemorySink::new();
    let observer = RecordingObserver::default();

    Converter::new(Config::default())
        .convert_text(
            source_path(),
            &raw,
            &compositions,
            open_validator(&mut sink),
            &observer,
        )
        .unwrap();

    assert_eq!(*observer.started.borrow(), vec![3]);
    assert_eq!(*observer.completed.borrow(), vec![2]);

    let outcomes = observer.outcomes.borrow();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], (1, SubmitOutcome::Accepted { position: 1 }));
    assert_eq!(outcomes[1], (2, SubmitOutcome::Accepted { position: 2 }));
    assert!(!outcomes[2].1.success());
}

#[test]
fn test_invalid_dataset_metadata_fails_before_reading_inputs() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        input_path: dir.path().join("missing"),
        composition_feedstock: dir.path().join("missing.json"),
        output_path: dir.path().join("out.json"),
        ..Config::default()
    };

    let result = Converter::new(config).run_observed(
        MetadataSource::Document(json!({"mdf-title": "Only a title"})),
        &SilentObserver,
    );

    assert!(matches!(result, Err(Error::Schema { .. })));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_unreadable_inputs_leave_existing_output_untouched() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("gdb8-15_all.json");
    std::fs::write(&output_path, "existing feedstock\n").unwrap();

    let composition_path = dir.path().join("gdb9-14_all.json");
    std::fs::write(&composition_path, json!({"mdf-composition": "CH4"}).to_string()).unwrap();

    // Spectra table missing
    let config = Config {
        input_path: dir.path().join("no-table.txt"),
        composition_feedstock: composition_path,
        output_path: output_path.clone(),
        composition_offset: 0,
        ..Config::default()
    };
    let result = Converter::new(config.clone()).run_observed(MetadataSource::Default, &SilentObserver);
    assert!(matches!(result, Err(Error::Io { .. })));
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "existing feedstock\n");

    // Composition feedstock missing
    let table_path = dir.path().join(crate::constants::DATA_FILE_NAME);
    std::fs::write(&table_path, create_spectra_text(1)).unwrap();
    let config = Config {
        input_path: table_path,
        composition_feedstock: dir.path().join("no-compositions.json"),
        ..config
    };
    let result = Converter::new(config).run_observed(MetadataSource::Default, &SilentObserver);
    assert!(matches!(result, Err(Error::Io { .. })));
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "existing feedstock\n");
}

#[test]
fn test_run_observed_reads_configured_files() {
    let dir = TempDir::new().unwrap();
    let dataset_dir = dir.path().join("gdb8-15");
    std::fs::create_dir_all(&dataset_dir).unwrap();
    std::fs::write(
        dataset_dir.join(crate::constants::DATA_FILE_NAME),
        create_spectra_text(2),
    )
    .unwrap();

    // Two leading documents belong to another sub-collection
    let feedstock: Vec<String> = ["skip-a", "skip-b", "C0", "C1H4", "C2H6"]
        .iter()
        .map(|c| json!({"mdf-composition": c}).to_string())
        .collect();
    let composition_path = dir.path().join("gdb9-14_all.json");
    std::fs::write(&composition_path, feedstock.join("\n")).unwrap();

    let output_path = dir.path().join("feedstock").join("gdb8-15_all.json");
    let config = Config {
        input_path: dataset_dir,
        composition_feedstock: composition_path,
        output_path: output_path.clone(),
        composition_offset: 2,
        ..Config::default()
    };

    let report = Converter::new(config)
        .run_observed(MetadataSource::Default, &SilentObserver)
        .unwrap();
    assert_eq!(report.records_accepted, 2);
    assert_eq!(report.output_path.as_deref(), Some(output_path.as_path()));

    let content = std::fs::read_to_string(&output_path).unwrap();
    let entries: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["mdf-resource_type"], json!("dataset"));
    assert_eq!(entries[1]["mdf-composition"], json!("C1H4"));
    assert_eq!(entries[2]["mdf-composition"], json!("C2H6"));
}

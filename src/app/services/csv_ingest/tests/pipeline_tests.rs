//! Tests for the ingestion pipeline orchestration

use super::super::field_parsers::readings_from_table;
use super::super::pipeline::IngestPipeline;
use super::*;
use crate::Error;
use crate::app::models::Pollutant;
use crate::config::{HeaderSchema, IngestConfig};

fn pipeline(config: IngestConfig) -> IngestPipeline {
    IngestPipeline::new(config).unwrap()
}

#[test]
fn test_ingest_full_upload() {
    let result = pipeline(IngestConfig::default())
        .ingest(&create_full_upload())
        .unwrap();

    assert_eq!(result.schema, HeaderSchema::Full);
    assert_eq!(result.table.header.len(), 11);
    assert_eq!(result.stats.data_rows, 2);
    assert_eq!(result.stats.rows_tokenized, 3);
    assert_eq!(result.stats.blank_rows_dropped, 0);
    assert!(!result.stats.bom_stripped);

    let readings = readings_from_table(&result.table).unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[1].get(Pollutant::Pm10), Some(75.0));
}

#[test]
fn test_ingest_rejects_wrong_order_when_enforced() {
    let text = "PM10,Tanggal,SO2,CO,O3,NO2\n1,2025-10-12,2,3,4,5\n";
    let config = IngestConfig::for_schema(HeaderSchema::Pollutants);

    let result = pipeline(config.clone()).ingest(text);
    assert!(matches!(result, Err(Error::OrderMismatch { .. })));

    let result = pipeline(config.with_any_order()).ingest(text).unwrap();
    assert_eq!(result.table.field(0, "Tanggal"), Some("2025-10-12"));
}

#[test]
fn test_header_check_fails_before_data_is_parsed() {
    // The bad numeric value is never reached because the header fails first
    let text = "Tanggal,PM10\n2025-10-12,abc\n";
    let result = pipeline(IngestConfig::for_schema(HeaderSchema::Pollutants)).ingest(text);

    match result {
        Err(Error::SchemaMismatch { missing, .. }) => {
            assert_eq!(missing, columns(&["SO2", "CO", "O3", "NO2"]));
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
}

#[test]
fn test_check_header_returns_observed_columns() {
    let header = pipeline(IngestConfig::for_schema(HeaderSchema::Meteorology))
        .check_header(&create_meteorology_upload(3))
        .unwrap();
    assert_eq!(header[0], "Tanggal");
    assert_eq!(header.len(), 6);
}

#[test]
fn test_blank_input_is_empty_input() {
    let ingest = pipeline(IngestConfig::default());
    assert!(matches!(ingest.ingest(""), Err(Error::EmptyInput { .. })));
    assert!(matches!(ingest.ingest(" \n\r\n"), Err(Error::EmptyInput { .. })));
}

#[test]
fn test_quote_only_input_is_empty_input() {
    let ingest = pipeline(IngestConfig::default());
    assert!(matches!(ingest.ingest("\"\""), Err(Error::EmptyInput { .. })));
    assert!(matches!(
        ingest.check_header("\"\"\n"),
        Err(Error::EmptyInput { .. })
    ));

    // A header row of empty cells carries no columns either
    assert!(matches!(ingest.ingest(",,,\n1,2,3,4\n"), Err(Error::EmptyInput { .. })));
}

#[test]
fn test_header_without_rows_is_empty_input() {
    let text = "Tanggal,PM10,SO2,CO,O3,NO2\n\n,,,,,\n";
    let result = pipeline(IngestConfig::for_schema(HeaderSchema::Pollutants)).ingest(text);
    assert!(matches!(result, Err(Error::EmptyInput { .. })));
}

#[test]
fn test_blank_rows_counted() {
    let text = "Tanggal,PM10,SO2,CO,O3,NO2\n2025-10-12,1,2,3,4,5\n\n,,,,,\n2025-10-13,1,2,3,4,5\n";
    let result = pipeline(IngestConfig::for_schema(HeaderSchema::Pollutants))
        .ingest(text)
        .unwrap();

    assert_eq!(result.stats.data_rows, 2);
    assert_eq!(result.stats.blank_rows_dropped, 2);
    assert_eq!(result.stats.retention_rate(), 50.0);
}

#[test]
fn test_byte_order_mark_is_stripped() {
    let text = format!("\u{feff}{}", create_full_upload());
    let result = pipeline(IngestConfig::default()).ingest(&text).unwrap();
    assert!(result.stats.bom_stripped);
    assert_eq!(result.table.header[0], "Tanggal");

    let kept = pipeline(IngestConfig::default().without_bom_stripping()).ingest(&text);
    assert!(matches!(kept, Err(Error::SchemaMismatch { .. })));
}

#[test]
fn test_meteorology_row_limit() {
    let config = IngestConfig::for_schema(HeaderSchema::Meteorology);

    assert!(pipeline(config.clone()).ingest(&create_meteorology_upload(7)).is_ok());

    match pipeline(config.clone()).ingest(&create_meteorology_upload(8)) {
        Err(Error::RowLimitExceeded { rows, limit }) => {
            assert_eq!(rows, 8);
            assert_eq!(limit, 7);
        }
        other => panic!("expected RowLimitExceeded, got {:?}", other),
    }

    let unlimited = config.with_max_rows(None);
    assert!(pipeline(unlimited).ingest(&create_meteorology_upload(30)).is_ok());
}

#[test]
fn test_non_numeric_meteorology_rejected() {
    let text = "Tanggal,Temperatur,Kelembapan,Curah Hujan,Penyinaran Matahari,Kecepatan Angin\n2025-10-20,27.1,humid,10.0,5.0,2.3\n";
    let result = pipeline(IngestConfig::for_schema(HeaderSchema::Meteorology)).ingest(text);

    match result {
        Err(Error::InvalidNumber { row, column, .. }) => {
            assert_eq!(row, 1);
            assert_eq!(column, "Kelembapan");
        }
        other => panic!("expected InvalidNumber, got {:?}", other),
    }
}

#[test]
fn test_empty_pollutant_fields_are_allowed() {
    let text = "Tanggal,PM10,SO2,CO,O3,NO2\n2025-10-12,,,,,9\n";
    let result = pipeline(IngestConfig::for_schema(HeaderSchema::Pollutants))
        .ingest(text)
        .unwrap();

    let readings = readings_from_table(&result.table).unwrap();
    assert_eq!(readings[0].len(), 1);
    assert_eq!(readings[0].get(Pollutant::No2), Some(9.0));
}

#[test]
fn test_semicolon_delimited_upload() {
    let text = "Tanggal;PM10;SO2;CO;O3;NO2\n2025-10-12;27,5;1;2;3;4\n";
    let config = IngestConfig::for_schema(HeaderSchema::Pollutants).with_delimiter(';');
    let result = pipeline(config).ingest(text);

    // Decimal commas are not numbers
    assert!(matches!(result, Err(Error::InvalidNumber { .. })));
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let result = IngestPipeline::new(IngestConfig::default().with_delimiter('\n'));
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_empty_meteorology_field_rejected() {
    let text = "Tanggal,Temperatur,Kelembapan,Curah Hujan,Penyinaran Matahari,Kecepatan Angin\n\
                2025-10-20,27.1,85,10.0,5.0,2.3\n\
                2025-10-21,,85,10.0,5.0,2.3\n";
    let result = pipeline(IngestConfig::for_schema(HeaderSchema::Meteorology)).ingest(text);

    match result {
        Err(Error::MissingValue { row, column }) => {
            assert_eq!(row, 2);
            assert_eq!(column, "Temperatur");
        }
        other => panic!("expected MissingValue, got {:?}", other),
    }
}

#[test]
fn test_full_upload_requires_meteorology_but_not_pollutants() {
    let header = crate::constants::FULL_HEADERS.join(",");

    let no_pollutants = format!("{}\n2025-10-12,,,,,,28.0,48.0,5.00,37.0,6.4\n", header);
    assert!(pipeline(IngestConfig::default()).ingest(&no_pollutants).is_ok());

    let no_wind = format!("{}\n2025-10-12,27,85,2000,5.5,2.1,28.0,48.0,5.00,37.0\n", header);
    assert!(matches!(
        pipeline(IngestConfig::default()).ingest(&no_wind),
        Err(Error::MissingValue { row: 1, .. })
    ));
}

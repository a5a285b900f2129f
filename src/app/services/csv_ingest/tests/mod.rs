//! Test utilities for the CSV ingestion pipeline
//!
//! Sample uploads shared by the tokenizer, header and pipeline tests.

use crate::constants::FULL_HEADERS;

mod pipeline_tests;
mod tokenizer_tests;

/// Full-schema upload with two observations
pub fn create_full_upload() -> String {
    let header = FULL_HEADERS.join(",");
    format!(
        "{}\n2025-10-12,27.0,85,2000,5.5,2.1,28.0,48.0,5.00,37.0,6.4\n2025-10-13,75,40,1000,30,20,27.5,80,0,5.2,3.1\n",
        header
    )
}

/// Meteorology-only upload with the given number of days
pub fn create_meteorology_upload(days: usize) -> String {
    let mut text = String::from(
        "Tanggal,Temperatur,Kelembapan,Curah Hujan,Penyinaran Matahari,Kecepatan Angin\n",
    );
    for day in 0..days {
        text.push_str(&format!("2025-10-{:02},27.1,85,10.0,5.0,2.3\n", day + 20));
    }
    text
}

/// Owned column list from string slices
pub fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

//! Quote-aware CSV tokenizer
//!
//! A single-pass, two-state machine over the input characters:
//!
//! - `Unquoted`: the delimiter ends a field, `\n` ends a field and the row,
//!   `\r\n` (or a lone `\r`) is one row terminator, `"` enters `Quoted`.
//! - `Quoted`: `""` is a literal quote, a lone `"` returns to `Unquoted`,
//!   everything else (delimiters and newlines included) is literal.
//!
//! Fields are trimmed after extraction. No type coercion happens here.

use crate::app::models::CsvTable;
use crate::constants::{DEFAULT_DELIMITER, QUOTE_CHAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    Quoted,
}

/// Tokenizer for one delimiter; holds no state between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    delimiter: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Tokenizer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Tokenize text into a header row plus non-blank data rows
    pub fn tokenize(&self, text: &str) -> CsvTable {
        into_table(self.scan(text, None))
    }

    /// Tokenize only the first `max_rows` rows, leaving the rest unread
    pub fn tokenize_preview(&self, text: &str, max_rows: usize) -> CsvTable {
        into_table(self.scan(text, Some(max_rows)))
    }

    /// All rows exactly as tokenized, blank rows included
    pub fn tokenize_rows(&self, text: &str) -> Vec<Vec<String>> {
        self.scan(text, None)
    }

    fn scan(&self, text: &str, limit: Option<usize>) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut state = State::Unquoted;
        let mut chars = text.chars().peekable();

        if limit == Some(0) {
            return rows;
        }

        while let Some(c) = chars.next() {
            match state {
                State::Quoted => {
                    if c == QUOTE_CHAR {
                        if chars.peek() == Some(&QUOTE_CHAR) {
                            field.push(QUOTE_CHAR);
                            chars.next();
                        } else {
                            state = State::Unquoted;
                        }
                    } else {
                        field.push(c);
                    }
                }
                State::Unquoted => match c {
                    c if c == self.delimiter => push_field(&mut row, &mut field),
                    '\n' => {
                        push_field(&mut row, &mut field);
                        rows.push(std::mem::take(&mut row));
                    }
                    '\r' => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        push_field(&mut row, &mut field);
                        rows.push(std::mem::take(&mut row));
                    }
                    QUOTE_CHAR => state = State::Quoted,
                    c => field.push(c),
                },
            }

            if limit.is_some_and(|max| rows.len() >= max) {
                return rows;
            }
        }

        // Input without a trailing newline
        if !field.is_empty() || !row.is_empty() {
            push_field(&mut row, &mut field);
            rows.push(row);
        }

        rows
    }
}

fn push_field(row: &mut Vec<String>, field: &mut String) {
    row.push(field.trim().to_string());
    field.clear();
}

/// Split tokenized rows into header and data, dropping rows of only empty fields
pub fn into_table(mut rows: Vec<Vec<String>>) -> CsvTable {
    if rows.is_empty() {
        return CsvTable::default();
    }

    let data = rows.split_off(1);
    let header = rows.pop().unwrap_or_default();

    CsvTable {
        header,
        data: data.into_iter().filter(|r| !is_blank_row(r)).collect(),
    }
}

/// Whether every field in a row is empty
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|field| field.is_empty())
}

/// Tokenize comma-separated text with the default settings
pub fn parse_csv(text: &str) -> CsvTable {
    Tokenizer::default().tokenize(text)
}

//! Tests for the quote-aware tokenizer

use super::super::tokenizer::{Tokenizer, parse_csv};
use super::columns;

#[test]
fn test_simple_round_trip() {
    let table = parse_csv("a,b,c\n1,2,3\n");
    assert_eq!(table.header, columns(&["a", "b", "c"]));
    assert_eq!(table.data, vec![columns(&["1", "2", "3"])]);
}

#[test]
fn test_quoted_fields_with_delimiter_and_escaped_quotes() {
    let table = parse_csv("a,\"x,y\",c\n1,\"he said \"\"hi\"\"\",3\n");
    assert_eq!(table.header, columns(&["a", "x,y", "c"]));
    assert_eq!(table.data[0], columns(&["1", "he said \"hi\"", "3"]));
}

#[test]
fn test_quoted_field_keeps_newlines() {
    let table = parse_csv("note,value\n\"line one\nline two\",5\n");
    assert_eq!(table.data.len(), 1);
    assert_eq!(table.data[0][0], "line one\nline two");
    assert_eq!(table.data[0][1], "5");
}

#[test]
fn test_missing_trailing_newline() {
    let table = parse_csv("a,b\n1,2");
    assert_eq!(table.data, vec![columns(&["1", "2"])]);
}

#[test]
fn test_crlf_and_cr_line_endings() {
    let crlf = parse_csv("a,b\r\n1,2\r\n3,4\r\n");
    assert_eq!(crlf.header, columns(&["a", "b"]));
    assert_eq!(crlf.data, vec![columns(&["1", "2"]), columns(&["3", "4"])]);

    let cr = parse_csv("a,b\r1,2\r");
    assert_eq!(cr.data, vec![columns(&["1", "2"])]);

    let mixed = parse_csv("a,b\n1,2\r\n3,4\r5,6");
    assert_eq!(mixed.data.len(), 3);
}

#[test]
fn test_fields_are_trimmed() {
    let table = parse_csv(" a , b \n 1 ,\" 2 \"\n");
    assert_eq!(table.header, columns(&["a", "b"]));
    assert_eq!(table.data[0], columns(&["1", "2"]));
}

#[test]
fn test_blank_rows_are_dropped_from_data() {
    let table = parse_csv("a,b\n\n1,2\n,\n  ,  \n3,4\n");
    assert_eq!(table.data, vec![columns(&["1", "2"]), columns(&["3", "4"])]);
}

#[test]
fn test_empty_input_yields_empty_table() {
    let table = parse_csv("");
    assert!(table.header.is_empty());
    assert!(table.data.is_empty());
    assert!(table.is_empty());
}

#[test]
fn test_header_only() {
    let table = parse_csv("a,b,c");
    assert_eq!(table.header, columns(&["a", "b", "c"]));
    assert!(table.data.is_empty());
}

#[test]
fn test_empty_trailing_field_is_kept() {
    let table = parse_csv("a,b,c\n1,,\n");
    assert_eq!(table.data[0], columns(&["1", "", ""]));
}

#[test]
fn test_unterminated_quote_consumes_rest() {
    let table = parse_csv("a,b\n\"1,2\n3,4");
    assert_eq!(table.data, vec![columns(&["1,2\n3,4"])]);
}

#[test]
fn test_custom_delimiter() {
    let tokenizer = Tokenizer::new(';');
    let table = tokenizer.tokenize("a;b\n1,5;2\n");
    assert_eq!(table.header, columns(&["a", "b"]));
    assert_eq!(table.data[0], columns(&["1,5", "2"]));
}

#[test]
fn test_preview_stops_after_limit() {
    let tokenizer = Tokenizer::default();
    let table = tokenizer.tokenize_preview("a,b\n1,2\n3,4\n", 1);
    assert_eq!(table.header, columns(&["a", "b"]));
    assert!(table.data.is_empty());

    let table = tokenizer.tokenize_preview("a,b\n1,2\n3,4\n", 2);
    assert_eq!(table.data.len(), 1);

    assert!(tokenizer.tokenize_preview("a,b\n", 0).is_empty());
}

#[test]
fn test_tokenize_rows_keeps_blank_rows() {
    let rows = Tokenizer::default().tokenize_rows("a\n\nb\n");
    assert_eq!(rows, vec![columns(&["a"]), columns(&[""]), columns(&["b"])]);
}

#[test]
fn test_repeated_calls_are_independent() {
    let tokenizer = Tokenizer::default();
    let first = tokenizer.tokenize("a,\"b\n");
    let second = tokenizer.tokenize("a,b\n1,2\n");
    assert_eq!(first.header, columns(&["a", "b"]));
    assert_eq!(second.data, vec![columns(&["1", "2"])]);
}

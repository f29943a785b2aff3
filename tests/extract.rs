use vendor_scan::io::csv_read::{extract_vendors, extract_vendors_from_rows};
use vendor_scan::{HeaderField, HeaderKind, QuoteFault, ToolError};

#[test]
fn vendor_name_column_is_lowercased() {
    let data = "id,Vendor Name,memo\na,ACME,b\nc,Acme,d\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert_eq!(vendors, vec!["acme", "acme"]);
}

#[test]
fn description_column_keeps_leading_token() {
    let data = "Description\n\"Foo Bar, misc\"\n\"foo baz, other\"\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert_eq!(vendors, vec!["foo bar", "foo baz"]);
}

#[test]
fn description_without_comma_is_kept_whole() {
    let data = "Date,Description\n2024-01-02,Corner Cafe\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert_eq!(vendors, vec!["corner cafe"]);
}

#[test]
fn unrecognised_header_yields_nothing() {
    let data = "date,amount,vendor name\n2024-01-02,3.50,Cafe\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert!(vendors.is_empty());
}

#[test]
fn empty_export_yields_nothing() {
    let vendors = extract_vendors("".as_bytes()).expect("export parsed");
    assert!(vendors.is_empty());
}

#[test]
fn header_only_export_yields_nothing() {
    let vendors = extract_vendors("Vendor Name\n".as_bytes()).expect("export parsed");
    assert!(vendors.is_empty());
}

#[test]
fn rightmost_recognised_header_wins() {
    let data = "Vendor Name,Description\nAcme,\"Zeta Corp, invoice 4\"\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert_eq!(vendors, vec!["zeta corp"]);
}

#[test]
fn header_match_is_exact() {
    let data = " Description,description,Vendor name\nA,B,C\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert!(vendors.is_empty());
}

#[test]
fn blank_lines_are_ignored() {
    let data = "Vendor Name\nAcme\n\nBeta\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert_eq!(vendors, vec!["acme", "beta"]);
}

#[test]
fn unequal_record_lengths_are_rejected() {
    let data = "id,Vendor Name\n1,Acme\n2\n";
    let error = extract_vendors(data.as_bytes()).expect_err("ragged export rejected");
    assert!(matches!(error, ToolError::Csv(_)), "unexpected error: {error}");
}

#[test]
fn extraction_is_repeatable() {
    let data = "Vendor Name\nAcme\nBeta\n";
    let first = extract_vendors(data.as_bytes()).expect("first pass");
    let second = extract_vendors(data.as_bytes()).expect("second pass");
    assert_eq!(first, second);
}

#[test]
fn rows_extraction_matches_reader_extraction() {
    let rows = vec![
        vec!["a", "b", "Vendor Name"],
        vec!["1", "2", "ACME"],
        vec!["3", "4", "Acme"],
    ];
    let vendors = extract_vendors_from_rows(&rows).expect("rows extracted");
    assert_eq!(vendors, vec!["acme", "acme"]);
}

#[test]
fn short_row_is_reported() {
    let rows = vec![
        vec!["id".to_string(), "Vendor Name".to_string()],
        vec!["1".to_string(), "Acme".to_string()],
        vec!["2".to_string()],
    ];
    let error = extract_vendors_from_rows(&rows).expect_err("short row rejected");
    match error {
        ToolError::RowTooShort { row, column, len } => {
            assert_eq!((row, column, len), (2, 1, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_detection_reports_column_and_kind() {
    let field = HeaderField::detect(["date", "Description", "amount"]).expect("field detected");
    assert_eq!(
        field,
        HeaderField {
            column: 1,
            kind: HeaderKind::Description
        }
    );
    assert_eq!(HeaderField::detect(["date", "amount"]), None);
}

#[test]
fn normalisation_collapses_case() {
    let kind = HeaderKind::VendorName;
    assert_eq!(kind.normalize("ACME"), "acme");
    assert_eq!(kind.normalize("Acme"), "acme");
    assert_eq!(kind.normalize("acme"), "acme");
    assert_eq!(HeaderKind::Description.normalize("ACME, ref 12, x"), "acme");
}

fn quote_fault(data: &str) -> (u64, QuoteFault) {
    match extract_vendors(data.as_bytes()).expect_err("broken quoting rejected") {
        ToolError::MalformedQuote { line, fault } => (line, fault),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unterminated_quote_is_rejected() {
    assert_eq!(
        quote_fault("Vendor Name\n\"Acme\nBeta\n"),
        (2, QuoteFault::Unterminated)
    );
}

#[test]
fn bare_quote_in_unquoted_field_is_rejected() {
    assert_eq!(quote_fault("Vendor Name\nAc\"me\n"), (2, QuoteFault::Bare));
}

#[test]
fn text_after_closing_quote_is_rejected() {
    assert_eq!(
        quote_fault("id,Vendor Name\r\n1,\"Acme\"x\r\n"),
        (2, QuoteFault::Extraneous)
    );
}

#[test]
fn escaped_and_multiline_quotes_are_accepted() {
    let data = "Vendor Name,memo\r\n\"Acme \"\"West\"\"\",\"line one\nline two\"\r\nBeta,\"\"\r\n";
    let vendors = extract_vendors(data.as_bytes()).expect("export parsed");
    assert_eq!(vendors, vec!["acme \"west\"", "beta"]);
}

#[test]
fn invalid_utf8_vendor_is_replaced_not_rejected() {
    let data: &[u8] = b"Vendor Name,memo\nCaf\xE9,ok\nAcme,\xFF\n";
    let vendors = extract_vendors(data).expect("Latin-1 export parsed");
    assert_eq!(vendors, vec!["caf\u{FFFD}", "acme"]);
}

#[test]
fn leading_byte_order_mark_is_ignored() {
    let vendors = extract_vendors("\u{feff}Vendor Name\nAcme\n".as_bytes()).expect("export parsed");
    assert_eq!(vendors, vec!["acme"]);
}

#[test]
fn final_sigma_follows_unicode_lowercasing() {
    assert_eq!(HeaderKind::VendorName.normalize("ΟΔΟΣ"), "οδος");
    assert_eq!(HeaderKind::VendorName.normalize("Σ"), "σ");
}

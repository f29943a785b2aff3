use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, instrument};

use crate::error::{QuoteFault, Result, ToolError};
use crate::model::HeaderField;

/// Opens a vendor export and extracts the vendor of every data row.
///
/// Failures are annotated with `path`. The file is closed before returning.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn read_vendors(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|error| ToolError::from(error).in_file(path))?;
    extract_vendors(file).map_err(|error| error.in_file(path))
}

/// Byte order mark some spreadsheet tools write at the start of an export.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extracts vendors from CSV data.
///
/// The first record is treated as the header row. Exports without a
/// `Description` or `Vendor Name` column yield no vendors. Records must all
/// have the same number of fields as the header and quotes must be balanced;
/// blank lines and a leading byte order mark are ignored.
pub fn extract_vendors<R: Read>(mut source: R) -> Result<Vec<String>> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents)?;
    let data = contents.strip_prefix(UTF8_BOM).unwrap_or(&contents);
    check_quotes(data)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(data);
    let mut records = reader.byte_records();

    let Some(header) = records.next().transpose()? else {
        debug!("export is empty");
        return Ok(Vec::new());
    };
    let Some(field) = HeaderField::detect(header.iter()) else {
        debug!("no vendor column in header");
        return Ok(Vec::new());
    };
    debug!(column = field.column, kind = %field.kind, "vendor column detected");

    let mut vendors = Vec::new();
    for (index, record) in records.enumerate() {
        let record = record?;
        let row = index as u64 + 1;
        vendors.push(vendor_for_row(&field, row, record.len(), record.iter())?);
    }
    Ok(vendors)
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    AfterQuote,
}

/// Rejects quotes the CSV reader would otherwise absorb into field data: a
/// `"` inside an unquoted field, anything but a separator after a closing
/// `"`, and a quoted field still open at the end of input. `\r\n` counts as
/// a single line break.
fn check_quotes(data: &[u8]) -> Result<()> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut quote_line = 1;
    let mut bytes = data.iter().copied().peekable();

    while let Some(mut byte) = bytes.next() {
        if byte == b'\r' && bytes.peek() == Some(&b'\n') {
            byte = b'\n';
            bytes.next();
        }
        let malformed = |fault| ToolError::MalformedQuote { line, fault };
        state = match (state, byte) {
            (QuoteState::FieldStart, b'"') => {
                quote_line = line;
                QuoteState::Quoted
            }
            (QuoteState::Unquoted, b'"') => {
                return Err(malformed(QuoteFault::Bare));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, b',' | b'\n') => {
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::AfterQuote,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::AfterQuote, b'"') => QuoteState::Quoted,
            (QuoteState::AfterQuote, b',' | b'\n') => QuoteState::FieldStart,
            (QuoteState::AfterQuote, _) => return Err(malformed(QuoteFault::Extraneous)),
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    match state {
        QuoteState::Quoted => Err(ToolError::MalformedQuote {
            line: quote_line,
            fault: QuoteFault::Unterminated,
        }),
        _ => Ok(()),
    }
}

/// Extracts vendors from rows that have already been split into fields.
///
/// Follows the same header rules as [`extract_vendors`]; rows may vary in
/// length, and a row that stops before the vendor column is an error.
pub fn extract_vendors_from_rows<I, R, S>(rows: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<[u8]>,
{
    let mut rows = rows.into_iter();
    let Some(field) = rows
        .next()
        .and_then(|header| HeaderField::detect(header.as_ref()))
    else {
        return Ok(Vec::new());
    };

    rows.enumerate()
        .map(|(index, cells)| {
            let cells = cells.as_ref();
            vendor_for_row(&field, index as u64 + 1, cells.len(), cells)
        })
        .collect()
}

fn vendor_for_row<I, S>(field: &HeaderField, row: u64, len: usize, cells: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    field.vendor(cells).ok_or_else(|| ToolError::RowTooShort {
        row,
        column: field.column,
        len,
    })
}

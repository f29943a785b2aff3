use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur while the
/// tool walks a directory tree and reads vendor exports.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as opening an export or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when an entry of the directory tree cannot be visited.
    #[error("directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Raised when an export is not well-formed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when a quote character breaks the CSV quoting rules.
    #[error("line {line}: {fault}")]
    MalformedQuote { line: u64, fault: QuoteFault },

    /// Raised when a data row ends before the detected vendor column.
    #[error("row {row} has {len} fields, vendor column {column} is out of range")]
    RowTooShort { row: u64, column: usize, len: usize },

    /// Attaches the offending export to a failure raised while reading it.
    #[error("{}: {}", .path.display(), .source)]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ToolError>,
    },

    /// Raised when the CLI is invoked without a directory to scan.
    #[error("please provide the -directory flag")]
    MissingDirectory,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// The ways a quote character can be misplaced in a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteFault {
    /// A `"` inside a field that did not start with a quote.
    #[error("bare \" in non-quoted field")]
    Bare,
    /// A closing `"` followed by something other than a separator.
    #[error("extraneous \" after quoted field")]
    Extraneous,
    /// Input ended while a quoted field was still open.
    #[error("quoted field is never closed")]
    Unterminated,
}

impl ToolError {
    /// Wraps the error with the path of the file being processed.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        ToolError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

use std::collections::BTreeSet;
use std::fmt;

/// Deduplicated, lexicographically ordered collection of vendor names gathered
/// across every export of a scan.
pub type VendorSet = BTreeSet<String>;

/// The semantic kind of a recognised header column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// Free-form transaction description whose leading comma-separated token
    /// names the vendor.
    Description,
    /// Dedicated vendor column holding the vendor name verbatim.
    VendorName,
}

impl HeaderKind {
    /// Header literal identifying the column in an export.
    pub const fn label(self) -> &'static str {
        match self {
            HeaderKind::Description => "Description",
            HeaderKind::VendorName => "Vendor Name",
        }
    }

    /// Recognises a header cell. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Description" => Some(HeaderKind::Description),
            "Vendor Name" => Some(HeaderKind::VendorName),
            _ => None,
        }
    }

    /// Normalises a raw cell value into a vendor name.
    pub fn normalize(self, value: &str) -> String {
        let lowered = value.to_lowercase();
        match self {
            HeaderKind::VendorName => lowered,
            HeaderKind::Description => match lowered.split_once(',') {
                Some((vendor, _detail)) => vendor.to_string(),
                None => lowered,
            },
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column of an export that identifies the vendor of each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    pub column: usize,
    pub kind: HeaderKind,
}

impl HeaderField {
    /// Scans a header row left to right. When several recognised headers are
    /// present the rightmost one wins. Cells that are not valid UTF-8 never
    /// match.
    pub fn detect<I, S>(header: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        header
            .into_iter()
            .enumerate()
            .filter_map(|(column, name)| {
                let kind = std::str::from_utf8(name.as_ref())
                    .ok()
                    .and_then(HeaderKind::from_label)?;
                Some(HeaderField { column, kind })
            })
            .last()
    }

    /// Extracts the normalised vendor from a data row, or `None` when the row
    /// does not reach the vendor column. Invalid UTF-8 is replaced with
    /// U+FFFD before normalisation.
    pub fn vendor<I, S>(&self, row: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        row.into_iter()
            .nth(self.column)
            .map(|value| self.kind.normalize(&String::from_utf8_lossy(value.as_ref())))
    }
}

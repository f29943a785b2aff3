use std::io::Write;
use std::path::Path;

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::error::Result;
use crate::io::csv_read;
use crate::model::VendorSet;

/// Suffix identifying vendor exports. Matched case-sensitively.
pub const CSV_SUFFIX: &str = ".csv";

/// Returns true when the path names a CSV export.
pub fn is_csv_path(path: &Path) -> bool {
    path.to_string_lossy().ends_with(CSV_SUFFIX)
}

/// Collects the vendors of every export below `root`.
#[instrument(level = "info", skip_all, fields(root = %root.display()))]
pub fn scan_directory(root: &Path) -> Result<VendorSet> {
    let vendors = collect_vendors(root, VendorSet::new())?;
    info!(vendor_count = vendors.len(), "scan complete");
    Ok(vendors)
}

/// Walks `root` and adds the vendors of every `.csv` file to `vendors`.
///
/// Entries are visited in file-name order and symlinked directories are not
/// followed. The first traversal, open, or parse error aborts the walk.
#[instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn collect_vendors(root: &Path, mut vendors: VendorSet) -> Result<VendorSet> {
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            continue;
        }
        if !is_csv_path(path) {
            debug!(path = %path.display(), "skipping non-CSV entry");
            continue;
        }

        let file_vendors = csv_read::read_vendors(path)?;
        info!(
            path = %path.display(),
            vendor_count = file_vendors.len(),
            "read vendors from export"
        );
        vendors.extend(file_vendors);
    }
    Ok(vendors)
}

/// Writes one vendor per line in set order.
pub fn write_vendors<W: Write>(out: &mut W, vendors: &VendorSet) -> Result<()> {
    for vendor in vendors {
        writeln!(out, "{vendor}")?;
    }
    out.flush()?;
    Ok(())
}

//! Core library for the vendor-scan command line application.
//!
//! The crate walks a directory of accounting exports and gathers the vendor
//! names they mention. CSV reading and per-file vendor extraction live under
//! [`io`], the header and normalisation rules in [`model`], and the directory
//! traversal that accumulates vendors across files in [`scan`].

pub mod error;
pub mod io;
pub mod model;
pub mod scan;

pub use error::{QuoteFault, Result, ToolError};
pub use model::{HeaderField, HeaderKind, VendorSet};

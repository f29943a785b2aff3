use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vendor_scan::scan;
use vendor_scan::{Result, ToolError};

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let directory = cli
        .directory
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or(ToolError::MissingDirectory)?;
    init_tracing()?;

    let vendors = scan::scan_directory(&directory)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    scan::write_vendors(&mut out, &vendors)
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

/// Accepts the single-dash `-directory` spelling alongside `--directory`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(text) if text == "-directory" || text.starts_with("-directory=") => {
                OsString::from(format!("-{text}"))
            }
            _ => arg,
        })
        .collect()
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "List the vendors named in a directory of CSV accounting exports."
)]
struct Cli {
    /// Absolute path to the directory containing the accounting exports.
    #[arg(long)]
    directory: Option<PathBuf>,
}

use anyhow::{Context, Result};
use clap::Parser;
use scripture_probe::brace_scan::{scan, DEFAULT_SIGNATURE};
use scripture_probe::config::{init_logging, ProbeConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Check brace balance of a function body and show the end of the file", long_about = None)]
struct Args {
    /// Source file to scan [default: src/app/bible-search/page.tsx]
    file: Option<PathBuf>,

    /// Text that opens the function; the body runs to the first `};` after it
    #[arg(long, default_value = DEFAULT_SIGNATURE)]
    signature: String,

    /// Number of trailing lines to print [default: $SCRIPTURE_TAIL_LINES or 10]
    #[arg(long)]
    tail: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ProbeConfig::from_env();
    let path = args.file.unwrap_or(config.brace_target);
    let source = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;

    let report = scan(&source, &args.signature, args.tail.unwrap_or(config.tail_lines));
    println!("{}", report);
    Ok(())
}

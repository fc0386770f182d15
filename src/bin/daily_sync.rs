use anyhow::{Context, Result};
use clap::Parser;
use schemars::schema_for;
use scripture_probe::config::{init_logging, ProbeConfig};
use scripture_probe::loader::{load_json, DocumentShape};
use scripture_probe::reconcile::{plan, ReconciledRecord, SyncPlan};
use scripture_probe::sink::{JsonFileSink, RecordSink};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Compare daily-verse files and convert the source into the target's record shape", long_about = None)]
#[command(after_help = "The target file is overwritten with the converted source records when the
first records of the two files have different key sets.

EXAMPLES:
    daily_sync --dry-run                 # Report only
    daily_sync --backup                  # Convert, keeping a copy of the old target
    daily_sync --print-schema            # Print the canonical record schema")]
struct Args {
    /// File whose records are converted [default: <assets>/daily/daily.json]
    #[arg(long)]
    source: Option<PathBuf>,

    /// File defining the expected shape and receiving the output [default: <assets>/daily/verses.json]
    #[arg(long)]
    target: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,

    /// Keep a timestamped copy of the target before overwriting it
    #[arg(long)]
    backup: bool,

    /// Print the JSON schema of the converted records and exit
    #[arg(long)]
    print_schema: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.print_schema {
        let schema = schema_for!(ReconciledRecord);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let config = ProbeConfig::from_env();
    let source_path = args.source.unwrap_or(config.daily_source);
    let target_path = args.target.unwrap_or(config.daily_target);

    println!("Checking if {} exists: {}", source_path.display(), source_path.exists());
    println!("Checking if {} exists: {}", target_path.display(), target_path.exists());

    let source = inspect(&source_path);
    let target = inspect(&target_path);
    let (Some(source), Some(target)) = (source, target) else {
        return Ok(());
    };

    let decision = plan(&source, &target);
    println!("\n{}", decision);

    if let SyncPlan::Convert { records, .. } = decision {
        if args.dry_run {
            println!("Dry run: {} left untouched", target_path.display());
            return Ok(());
        }
        let sink = JsonFileSink::new(target_path).with_backup(args.backup);
        sink.persist(&records)
            .with_context(|| format!("saving converted data to {}", sink.path().display()))?;
        println!("Converted data saved to {}", sink.path().display());
    }
    Ok(())
}

/// Load and describe one file. Failures are printed, not propagated.
fn inspect(path: &Path) -> Option<Value> {
    match load_json(path) {
        Ok(value) => {
            println!("\nSuccessfully loaded {}", path.display());
            println!("{}", DocumentShape::of(&value));
            Some(value)
        }
        Err(e) => {
            println!("\nError reading {}: {}", path.display(), e);
            None
        }
    }
}

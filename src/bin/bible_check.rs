use anyhow::Result;
use clap::Parser;
use scripture_probe::config::{init_logging, ProbeConfig};
use scripture_probe::loader::{load_translation, locate};
use scripture_probe::record::ReferenceQuery;
use scripture_probe::report::{QueryReport, TranslationSummary};
use scripture_probe::resolver::{book_census, ReferenceResolver};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Inspect Bible translation files and probe them for references", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    SCRIPTURE_ASSETS_DIR  Root of the bible assets [default: public/assets/bible]
    RUST_LOG              Log filter (e.g. scripture_probe=debug)

EXAMPLES:
    bible_check                                   # Default translations and probe verses
    bible_check indo_tb.json -q \"Amsal 10:17\"      # One file, one reference
    bible_check --json EN-English/asv.json        # Machine-readable output")]
struct Args {
    /// Translation files; relative paths are also tried under the assets dir
    files: Vec<PathBuf>,

    /// Reference to look up, as "Book chapter:verse" (repeatable)
    #[arg(short = 'q', long = "query")]
    queries: Vec<ReferenceQuery>,

    /// Print findings as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ProbeConfig::from_env();
    let files = if args.files.is_empty() { config.translations.clone() } else { args.files };
    let queries = if args.queries.is_empty() { config.probe_queries.clone() } else { args.queries };

    for file in &files {
        let Some(path) = locate(file, &config.assets_dir) else {
            println!("\nFile not found: {}", file.display());
            continue;
        };
        // A bad file is reported and skipped; the rest still get analyzed.
        if let Err(e) = analyze(&path, &queries, args.json) {
            println!("Error analyzing {}: {:#}", path.display(), e);
        }
    }
    Ok(())
}

fn analyze(path: &Path, queries: &[ReferenceQuery], as_json: bool) -> Result<()> {
    let translation = load_translation(path)?;
    let resolver = ReferenceResolver::new(&translation.verses);
    let resolutions: Vec<_> = queries.iter().map(|q| (q, resolver.resolve(q))).collect();
    let census = book_census(&translation.verses);

    if as_json {
        let results: Vec<_> = resolutions
            .iter()
            .map(|(query, resolution)| json!({ "query": query, "resolution": resolution }))
            .collect();
        let doc = json!({
            "file": path.display().to_string(),
            "top_level_keys": translation.top_level_keys,
            "verse_count": translation.verses.len(),
            "results": results,
            "census": census,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("\nAnalyzing Bible file: {}", path.display());
    println!("{}", TranslationSummary(&translation));
    for (query, resolution) in &resolutions {
        println!("{}", QueryReport { query, resolution });
    }
    println!("\n{}", census);
    Ok(())
}

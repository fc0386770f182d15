use crate::brace_scan::DEFAULT_TARGET;
use crate::record::ReferenceQuery;
use std::env;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// A setting read from the environment, with `.env` as a fallback source.
pub trait EnvSetting {
    /// The environment variable holding this setting
    const VAR_NAME: &'static str;

    /// Value used when the variable is unset
    const DEFAULT: &'static str;

    /// Raw value if the variable is set (after loading `.env`)
    fn find() -> Option<String> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        env::var(Self::VAR_NAME).ok().filter(|v| !v.trim().is_empty())
    }

    fn read() -> String {
        Self::find().unwrap_or_else(|| Self::DEFAULT.to_string())
    }
}

/// Root directory holding `ID-Indonesian/`, `EN-English/` and `daily/`.
pub struct AssetsDir;

impl EnvSetting for AssetsDir {
    const VAR_NAME: &'static str = "SCRIPTURE_ASSETS_DIR";
    const DEFAULT: &'static str = "public/assets/bible";
}

/// Number of trailing lines `brace_check` prints.
pub struct TailLines;

impl EnvSetting for TailLines {
    const VAR_NAME: &'static str = "SCRIPTURE_TAIL_LINES";
    const DEFAULT: &'static str = "10";
}

impl TailLines {
    pub fn value() -> usize {
        let raw = Self::read();
        raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = Self::VAR_NAME, value = %raw, "not a line count, using default");
            10
        })
    }
}

const TRANSLATIONS: &[&str] = &[
    "ID-Indonesian/indo_tb.json",
    "ID-Indonesian/indo_tm.json",
    "EN-English/asv.json",
];

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub assets_dir: PathBuf,
    pub translations: Vec<PathBuf>,
    pub daily_source: PathBuf,
    pub daily_target: PathBuf,
    pub probe_queries: Vec<ReferenceQuery>,
    pub brace_target: PathBuf,
    pub tail_lines: usize,
}

impl ProbeConfig {
    pub fn from_env() -> Self {
        Self::with_assets_dir(PathBuf::from(AssetsDir::read()), TailLines::value())
    }

    pub fn with_assets_dir(assets_dir: PathBuf, tail_lines: usize) -> Self {
        Self {
            translations: TRANSLATIONS.iter().map(|p| assets_dir.join(p)).collect(),
            daily_source: assets_dir.join("daily").join("daily.json"),
            daily_target: assets_dir.join("daily").join("verses.json"),
            probe_queries: vec![
                ReferenceQuery::new("Amsal", 10, 17),
                ReferenceQuery::new("Yeremia", 21, 8),
                ReferenceQuery::new("Wahyu", 22, 2),
            ],
            brace_target: PathBuf::from(DEFAULT_TARGET),
            tail_lines,
            assets_dir,
        }
    }
}

/// Install the stderr log subscriber shared by the command-line tools.
/// `verbose` forces debug output for this crate; otherwise `RUST_LOG`
/// applies, defaulting to warnings. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("scripture_probe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

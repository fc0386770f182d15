use scripture_probe::config::{init_logging, ProbeConfig};
use scripture_probe::record::ReferenceQuery;
use std::path::PathBuf;

#[test]
fn config_paths_hang_off_assets_dir() {
    let config = ProbeConfig::with_assets_dir(PathBuf::from("assets"), 4);
    assert_eq!(config.translations[0], PathBuf::from("assets/ID-Indonesian/indo_tb.json"));
    assert_eq!(config.translations.len(), 3);
    assert_eq!(config.daily_source, PathBuf::from("assets/daily/daily.json"));
    assert_eq!(config.daily_target, PathBuf::from("assets/daily/verses.json"));
    assert_eq!(config.probe_queries[0], ReferenceQuery::new("Amsal", 10, 17));
    assert_eq!(config.tail_lines, 4);
}

#[test]
fn logging_can_be_initialized_repeatedly() {
    init_logging(true);
    init_logging(false);
    tracing::debug!(target: "scripture_probe::config", "subscriber installed");
}

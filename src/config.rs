use std::path::PathBuf;

/// Directory layout for one mapping run: where anchor files are read from
/// and where the match outputs land.
#[derive(Debug, Clone, Default)]
pub struct MappingConfig {
    pub aligned_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl MappingConfig {
    pub const SEARCH_RESULTS_FILE: &'static str = "scp_map";
    pub const DUMP_FILE: &'static str = "dump";
    pub const STATS_DIR: &'static str = "stats";
    pub const ANCHORS_DIR: &'static str = "anchors";
    pub const REPORT_FILE: &'static str = "report.json";

    pub fn new(aligned_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            aligned_dir: aligned_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Confirmed `hyp ref` pairs, one per line.
    pub fn search_results_path(&self) -> PathBuf {
        self.output_dir.join(Self::SEARCH_RESULTS_FILE)
    }

    /// Per-pair CSID statistics.
    pub fn dump_path(&self) -> PathBuf {
        self.output_dir.join(Self::DUMP_FILE)
    }

    /// Per-side id listings.
    pub fn stats_dir(&self) -> PathBuf {
        self.output_dir.join(Self::STATS_DIR)
    }

    /// Propagated anchor artifacts for confirmed pairs.
    pub fn anchors_dir(&self) -> PathBuf {
        self.output_dir.join(Self::ANCHORS_DIR)
    }

    /// JSON run summary.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(Self::REPORT_FILE)
    }

    pub fn stat_path(&self, name: &str) -> PathBuf {
        self.stats_dir().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_empty() {
        let config = MappingConfig::default();
        assert!(config.aligned_dir.as_os_str().is_empty());
        assert!(config.output_dir.as_os_str().is_empty());
    }

    #[test]
    fn derived_paths_live_under_output_dir() {
        let config = MappingConfig::new("in", "out");
        assert_eq!(config.search_results_path(), PathBuf::from("out/scp_map"));
        assert_eq!(config.dump_path(), PathBuf::from("out/dump"));
        assert_eq!(
            config.stat_path("unmatched_hyp"),
            PathBuf::from("out/stats/unmatched_hyp")
        );
        assert_eq!(config.anchors_dir(), PathBuf::from("out/anchors"));
        assert_eq!(config.report_path(), PathBuf::from("out/report.json"));
    }
}

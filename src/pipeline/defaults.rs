use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::anchor;
use crate::config::MappingConfig;
use crate::error::MappingError;
use crate::matching::report::{dump_line, match_line};
use crate::matching::MatchOutcome;
use crate::pipeline::traits::{AnchorSource, MatchSink};
use crate::types::AnchorRecord;

/// Default source: every regular file under the aligned directory is an
/// anchor artifact. Enumeration is sorted by file name, which fixes the
/// record order and with it every first-seen tie-break downstream.
#[derive(Debug, Clone)]
pub struct DirectoryAnchorSource {
    aligned_dir: PathBuf,
}

impl DirectoryAnchorSource {
    pub fn new(aligned_dir: impl Into<PathBuf>) -> Self {
        Self {
            aligned_dir: aligned_dir.into(),
        }
    }
}

impl AnchorSource for DirectoryAnchorSource {
    fn load(&self) -> Result<Vec<AnchorRecord>, MappingError> {
        let paths = anchor::collect_anchor_paths(&self.aligned_dir)?;
        let mut records = Vec::with_capacity(paths.len());
        for path in &paths {
            records.push(anchor::record_from_file(path)?);
        }
        tracing::debug!(
            aligned_dir = %self.aligned_dir.display(),
            count = records.len(),
            "loaded anchor records"
        );
        Ok(records)
    }
}

/// Default sink: writes the match list, dump, per-side stats listings, and
/// copies each confirmed pair's anchor artifact under its canonical id.
#[derive(Debug, Clone)]
pub struct FileMatchSink {
    config: MappingConfig,
}

impl FileMatchSink {
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    fn write_lines(path: &Path, lines: &[String]) -> Result<(), MappingError> {
        let context = path.display().to_string();
        let mut file = fs::File::create(path)
            .map_err(|e| MappingError::io(format!("creating {context}"), e))?;
        for line in lines {
            writeln!(file, "{line}").map_err(|e| MappingError::io(format!("writing {context}"), e))?;
        }
        Ok(())
    }

    fn propagate_anchors(
        &self,
        outcome: &MatchOutcome,
        records: &[AnchorRecord],
    ) -> Result<(), MappingError> {
        let confirmed: HashSet<(&str, &str)> = outcome
            .pairs
            .iter()
            .map(|pair| (pair.hyp_id.as_str(), pair.ref_id.as_str()))
            .collect();

        let anchors_dir = self.config.anchors_dir();
        for record in records {
            let Some(artifact) = record.artifact.as_deref() else {
                continue;
            };
            if !confirmed.contains(&(record.hyp_id.as_str(), record.ref_id.as_str())) {
                continue;
            }
            let canonical = anchor::canonical_pair_id(&record.hyp_id, &record.ref_id);
            let destination =
                anchors_dir.join(format!("{canonical}.{}", anchor::ANCHOR_EXTENSION));
            fs::copy(artifact, &destination).map_err(|e| {
                MappingError::io(
                    format!(
                        "copying {} to {}",
                        artifact.display(),
                        destination.display()
                    ),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

impl MatchSink for FileMatchSink {
    fn write(
        &self,
        outcome: &MatchOutcome,
        records: &[AnchorRecord],
    ) -> Result<(), MappingError> {
        for dir in [
            self.config.output_dir.clone(),
            self.config.stats_dir(),
            self.config.anchors_dir(),
        ] {
            fs::create_dir_all(&dir)
                .map_err(|e| MappingError::io(format!("creating {}", dir.display()), e))?;
        }

        let match_lines: Vec<String> = outcome.pairs.iter().map(match_line).collect();
        Self::write_lines(&self.config.search_results_path(), &match_lines)?;

        let dump_lines: Vec<String> = outcome.pairs.iter().map(dump_line).collect();
        Self::write_lines(&self.config.dump_path(), &dump_lines)?;

        let diagnostics = &outcome.diagnostics;
        for (name, ids) in [
            ("unmatched_hyp", &diagnostics.unmatched_hyps),
            ("unmatched_ref", &diagnostics.unmatched_refs),
            ("searched_hyp", &diagnostics.all_hyps),
            ("searched_ref", &diagnostics.all_refs),
        ] {
            Self::write_lines(&self.config.stat_path(name), ids)?;
        }

        self.propagate_anchors(outcome, records)?;

        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            matched = outcome.pairs.len(),
            "wrote mapping outputs"
        );
        Ok(())
    }
}

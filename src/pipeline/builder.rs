use crate::config::MappingConfig;
use crate::error::MappingError;
use crate::matching::{CandidateRanking, RawMatchCount};
use crate::pipeline::defaults::{DirectoryAnchorSource, FileMatchSink};
use crate::pipeline::runtime::{PrimaryMapper, PrimaryMapperParts};
use crate::pipeline::traits::{AnchorSource, MatchSink};

/// Assembles a [`PrimaryMapper`], defaulting any stage that is not
/// overridden: directory source, raw-match-count ranking, file sink.
pub struct PrimaryMapperBuilder {
    config: MappingConfig,
    source: Option<Box<dyn AnchorSource>>,
    ranking: Option<Box<dyn CandidateRanking>>,
    sink: Option<Box<dyn MatchSink>>,
}

impl PrimaryMapperBuilder {
    pub fn new(config: MappingConfig) -> Self {
        Self {
            config,
            source: None,
            ranking: None,
            sink: None,
        }
    }

    pub fn with_source(mut self, source: Box<dyn AnchorSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_ranking(mut self, ranking: Box<dyn CandidateRanking>) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn MatchSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<PrimaryMapper, MappingError> {
        if self.source.is_none() && !self.config.aligned_dir.is_dir() {
            return Err(MappingError::invalid_input(format!(
                "aligned dir '{}' is not a directory",
                self.config.aligned_dir.display()
            )));
        }
        if self.sink.is_none() && self.config.output_dir.as_os_str().is_empty() {
            return Err(MappingError::invalid_input(
                "output dir must be set when using the file sink",
            ));
        }

        let source = self
            .source
            .unwrap_or_else(|| Box::new(DirectoryAnchorSource::new(self.config.aligned_dir.clone())));
        let ranking = self
            .ranking
            .unwrap_or_else(|| Box::new(RawMatchCount));
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(FileMatchSink::new(self.config.clone())));

        Ok(PrimaryMapper::from_parts(PrimaryMapperParts {
            source,
            ranking,
            sink,
        }))
    }
}

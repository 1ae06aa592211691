use crate::error::MappingError;
use crate::matching::{self, CandidateRanking, MatchOutcome};
use crate::pipeline::traits::{AnchorSource, MatchSink};

/// One resolution run over a record source: load, resolve, materialize.
pub struct PrimaryMapper {
    source: Box<dyn AnchorSource>,
    ranking: Box<dyn CandidateRanking>,
    sink: Box<dyn MatchSink>,
}

pub(crate) struct PrimaryMapperParts {
    pub source: Box<dyn AnchorSource>,
    pub ranking: Box<dyn CandidateRanking>,
    pub sink: Box<dyn MatchSink>,
}

/// What a completed run produced, for callers that want more than the files.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRun {
    pub record_count: usize,
    pub outcome: MatchOutcome,
}

impl PrimaryMapper {
    pub(crate) fn from_parts(parts: PrimaryMapperParts) -> Self {
        Self {
            source: parts.source,
            ranking: parts.ranking,
            sink: parts.sink,
        }
    }

    pub fn run(&self) -> Result<MappingRun, MappingError> {
        let records = self.source.load()?;
        tracing::info!(record_count = records.len(), "resolving anchor records");

        let outcome = matching::resolve(&records, self.ranking.as_ref());
        self.sink.write(&outcome, &records)?;

        Ok(MappingRun {
            record_count: records.len(),
            outcome,
        })
    }
}

use crate::error::MappingError;
use crate::matching::MatchOutcome;
use crate::types::AnchorRecord;

pub use crate::matching::CandidateRanking;

/// Supplies the alignment records for one resolution run.
pub trait AnchorSource: Send + Sync {
    fn load(&self) -> Result<Vec<AnchorRecord>, MappingError>;
}

/// Materializes a resolution outcome. `records` is the same collection the
/// outcome was resolved from, so sinks can propagate confirmed artifacts.
pub trait MatchSink: Send + Sync {
    fn write(&self, outcome: &MatchOutcome, records: &[AnchorRecord])
        -> Result<(), MappingError>;
}

//! Bidirectional best-match resolution.
//!
//! Many anchor records may propose pairings for the same hypothesis or
//! reference id. Resolution runs two passes over the records: pass 1 builds
//! per-side best-candidate maps, pass 2 confirms a pair only when each side
//! independently ranks the other as its top candidate.

mod best_candidate;
pub mod report;

pub use best_candidate::{CandidateRanking, CorrectnessRatio, RawMatchCount};

use serde::Serialize;

use crate::types::{AnchorRecord, Csid};

use best_candidate::BestCandidates;
use report::Diagnostics;

/// One confirmed hypothesis/reference correspondence with the winning
/// record's CSID counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub hyp_id: String,
    pub ref_id: String,
    pub csid: Csid,
}

/// Everything one resolution run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// Confirmed pairs in discovery order (first-seen order of hypothesis
    /// ids). Each id appears at most once across the set.
    pub pairs: Vec<MatchedPair>,
    pub diagnostics: Diagnostics,
}

/// Resolves a record collection into mutually confirmed pairs.
///
/// Pure and total: identical input (including order) yields identical
/// output. Duplicate records are harmless; the strictly-greater preference
/// test keeps the first occurrence.
pub fn resolve(records: &[AnchorRecord], ranking: &dyn CandidateRanking) -> MatchOutcome {
    let mut best_by_hyp = BestCandidates::new();
    let mut best_by_ref = BestCandidates::new();
    for record in records {
        best_by_hyp.offer(&record.hyp_id, &record.ref_id, record.csid, ranking);
        best_by_ref.offer(&record.ref_id, &record.hyp_id, record.csid, ranking);
    }

    let mut pairs = Vec::new();
    for (hyp_id, candidate) in best_by_hyp.iter() {
        let mutual = best_by_ref
            .get(&candidate.partner)
            .is_some_and(|counterpart| counterpart.partner == *hyp_id);
        if mutual {
            pairs.push(MatchedPair {
                hyp_id: hyp_id.clone(),
                ref_id: candidate.partner.clone(),
                csid: candidate.csid,
            });
        }
    }

    tracing::debug!(
        records = records.len(),
        hyps = best_by_hyp.ids().len(),
        refs = best_by_ref.ids().len(),
        matched = pairs.len(),
        "resolved mutual best matches"
    );

    let diagnostics = Diagnostics::collect(best_by_hyp.ids(), best_by_ref.ids(), &pairs);
    MatchOutcome { pairs, diagnostics }
}

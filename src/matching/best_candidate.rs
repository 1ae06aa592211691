use std::collections::HashMap;

use crate::types::Csid;

/// Fixed-point scale for ratio-valued preference keys.
const RATIO_SCALE: f64 = 1_000_000.0;

/// Comparison key used to pick one side's best counterpart. Higher wins;
/// equal keys keep the first-seen candidate.
pub trait CandidateRanking: Send + Sync {
    fn preference(&self, csid: &Csid) -> u64;
}

/// Default ranking: the raw count of matching tokens.
///
/// Longer texts trivially accumulate more matches, so this can prefer a long
/// weak overlap over a short clean one. [`CorrectnessRatio`] is the
/// normalized alternative; switching to it changes which pairs survive, so
/// it stays opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawMatchCount;

impl CandidateRanking for RawMatchCount {
    fn preference(&self, csid: &Csid) -> u64 {
        u64::from(csid.correct)
    }
}

/// Length-normalized ranking: correctness ratio in parts per million.
/// Integer-keyed so ordering stays total and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectnessRatio;

impl CandidateRanking for CorrectnessRatio {
    fn preference(&self, csid: &Csid) -> u64 {
        match csid.correctness_ratio() {
            Some(ratio) => (ratio * RATIO_SCALE) as u64,
            None => 0,
        }
    }
}

/// One side's current best counterpart.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) partner: String,
    pub(crate) csid: Csid,
    preference: u64,
}

/// Best-candidate accumulator for one side. Ids iterate in first-seen order;
/// a stored candidate is only displaced by a strictly higher preference, so
/// ties keep the earliest record.
#[derive(Debug, Default)]
pub(crate) struct BestCandidates {
    order: Vec<String>,
    best: HashMap<String, Candidate>,
}

impl BestCandidates {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn offer(
        &mut self,
        id: &str,
        partner: &str,
        csid: Csid,
        ranking: &dyn CandidateRanking,
    ) {
        let preference = ranking.preference(&csid);
        match self.best.get_mut(id) {
            None => {
                self.order.push(id.to_string());
                self.best.insert(
                    id.to_string(),
                    Candidate {
                        partner: partner.to_string(),
                        csid,
                        preference,
                    },
                );
            }
            Some(current) if preference > current.preference => {
                current.partner = partner.to_string();
                current.csid = csid;
                current.preference = preference;
            }
            Some(_) => {}
        }
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Candidate> {
        self.best.get(id)
    }

    /// Ids in first-seen order.
    pub(crate) fn ids(&self) -> &[String] {
        &self.order
    }

    /// (id, best candidate) pairs in first-seen order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Candidate)> {
        self.order
            .iter()
            .filter_map(move |id| self.best.get(id).map(|candidate| (id, candidate)))
    }
}

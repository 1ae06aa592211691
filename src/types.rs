use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Single step of an edit-distance alignment path, read as transforming the
/// source sequence into the target sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOp {
    Match,
    Substitution,
    Insertion,
    Deletion,
}

impl EditOp {
    /// One-letter label used in anchor files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Match => "C",
            Self::Substitution => "S",
            Self::Insertion => "I",
            Self::Deletion => "D",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "C" => Some(Self::Match),
            "S" => Some(Self::Substitution),
            "I" => Some(Self::Insertion),
            "D" => Some(Self::Deletion),
            _ => None,
        }
    }
}

/// Operation counts along one optimal alignment path.
///
/// Invariants: `correct + substitutions + deletions` equals the source length
/// and `correct + substitutions + insertions` equals the target length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Csid {
    pub correct: u32,
    pub substitutions: u32,
    pub insertions: u32,
    pub deletions: u32,
}

impl Csid {
    pub fn new(correct: u32, substitutions: u32, insertions: u32, deletions: u32) -> Self {
        Self {
            correct,
            substitutions,
            insertions,
            deletions,
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.substitutions + self.insertions + self.deletions
    }

    /// Fraction of aligned tokens classified as Match. `None` when the path
    /// is empty (both sequences empty).
    pub fn correctness_ratio(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(total))
        }
    }
}

/// Result of aligning two token sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alignment {
    /// Minimum number of single-token insert/delete/substitute operations.
    pub distance: u32,
    pub csid: Csid,
    /// Classified optimal path, in source-to-target reading order.
    pub ops: Vec<EditOp>,
    /// Source tokens with every maximal run of non-Match tokens wrapped in
    /// "[" … "]", joined by single spaces.
    pub annotated_source: String,
    /// Target tokens, annotated the same way.
    pub annotated_target: String,
}

/// One candidate (hypothesis, reference) pairing fed to the matcher.
///
/// Immutable once read; many records may name the same hypothesis or
/// reference id.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorRecord {
    pub hyp_id: String,
    pub ref_id: String,
    pub csid: Csid,
    /// Anchor artifact this record was read from, kept for propagation of
    /// confirmed pairs. `None` for records built in memory.
    pub artifact: Option<PathBuf>,
}

impl AnchorRecord {
    pub fn new(hyp_id: impl Into<String>, ref_id: impl Into<String>, csid: Csid) -> Self {
        Self {
            hyp_id: hyp_id.into(),
            ref_id: ref_id.into(),
            csid,
            artifact: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csid_total_and_ratio() {
        let csid = Csid::new(3, 1, 0, 1);
        assert_eq!(csid.total(), 5);
        let ratio = csid.correctness_ratio().expect("non-empty path");
        assert!((ratio - 0.6).abs() < 1e-12);
    }

    #[test]
    fn empty_csid_has_no_ratio() {
        assert_eq!(Csid::default().correctness_ratio(), None);
    }

    #[test]
    fn op_labels_round_trip() {
        for op in [
            EditOp::Match,
            EditOp::Substitution,
            EditOp::Insertion,
            EditOp::Deletion,
        ] {
            assert_eq!(EditOp::from_label(op.label()), Some(op));
        }
        assert_eq!(EditOp::from_label("X"), None);
    }
}

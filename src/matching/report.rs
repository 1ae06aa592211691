use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::error::MappingError;
use crate::matching::{MatchOutcome, MatchedPair};
use crate::types::Csid;

/// Per-side id listings for one resolution run. Every listing keeps
/// first-seen input order so repeated runs produce identical files.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Diagnostics {
    pub all_hyps: Vec<String>,
    pub all_refs: Vec<String>,
    pub matched_hyps: Vec<String>,
    pub matched_refs: Vec<String>,
    pub unmatched_hyps: Vec<String>,
    pub unmatched_refs: Vec<String>,
}

impl Diagnostics {
    pub(crate) fn collect(all_hyps: &[String], all_refs: &[String], pairs: &[MatchedPair]) -> Self {
        let matched_hyps: Vec<String> = pairs.iter().map(|pair| pair.hyp_id.clone()).collect();
        let matched_refs: Vec<String> = pairs.iter().map(|pair| pair.ref_id.clone()).collect();
        Self {
            unmatched_hyps: subtract(all_hyps, &matched_hyps),
            unmatched_refs: subtract(all_refs, &matched_refs),
            all_hyps: all_hyps.to_vec(),
            all_refs: all_refs.to_vec(),
            matched_hyps,
            matched_refs,
        }
    }
}

fn subtract(all: &[String], matched: &[String]) -> Vec<String> {
    let matched: HashSet<&str> = matched.iter().map(String::as_str).collect();
    all.iter()
        .filter(|id| !matched.contains(id.as_str()))
        .cloned()
        .collect()
}

/// `scp_map` line for one confirmed pair.
pub fn match_line(pair: &MatchedPair) -> String {
    format!("{} {}", pair.hyp_id, pair.ref_id)
}

/// `dump` line for one confirmed pair: ids, the four CSID counts, their sum,
/// and the correctness ratio to two decimals.
pub fn dump_line(pair: &MatchedPair) -> String {
    let csid = &pair.csid;
    format!(
        "{} {} {} {} {} {} {} {:.2}",
        pair.hyp_id,
        pair.ref_id,
        csid.correct,
        csid.substitutions,
        csid.insertions,
        csid.deletions,
        csid.total(),
        csid.correctness_ratio().unwrap_or(0.0),
    )
}

/// One parsed dump line, the inverse of [`dump_line`]. Secondary mapping
/// stages re-read the dump to seed their own candidate search, so the
/// rendered form must stay parseable.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpRecord {
    pub hyp_id: String,
    pub ref_id: String,
    pub csid: Csid,
    pub total: u32,
    pub ratio: f64,
}

/// Parses one dump line. `context` names the source for error messages.
pub fn parse_dump_line(line: &str, context: &str) -> Result<DumpRecord, MappingError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 8 {
        return Err(MappingError::parse(
            context,
            format!("expected 8 dump fields, found {}", fields.len()),
        ));
    }
    let mut counts = [0u32; 4];
    for (slot, field) in counts.iter_mut().zip(&fields[2..6]) {
        *slot = field.parse().map_err(|_| {
            MappingError::parse(context, format!("non-numeric dump field '{field}'"))
        })?;
    }
    let total = fields[6].parse().map_err(|_| {
        MappingError::parse(context, format!("non-numeric dump field '{}'", fields[6]))
    })?;
    let ratio = fields[7].parse().map_err(|_| {
        MappingError::parse(context, format!("non-numeric dump field '{}'", fields[7]))
    })?;

    Ok(DumpRecord {
        hyp_id: fields[0].to_string(),
        ref_id: fields[1].to_string(),
        csid: Csid::new(counts[0], counts[1], counts[2], counts[3]),
        total,
        ratio,
    })
}

/// Reads a previously written dump file back into records. Blank lines are
/// skipped; any malformed line fails the read.
pub fn read_dump(path: &Path) -> Result<Vec<DumpRecord>, MappingError> {
    let context = path.display().to_string();
    let text = std::fs::read_to_string(path)
        .map_err(|e| MappingError::io(format!("reading dump {context}"), e))?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_dump_line(line, &context))
        .collect()
}

/// JSON summary written next to the mapping outputs.
#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub counts: MatchCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub aligned_dir: String,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchCounts {
    pub hyps_searched: usize,
    pub refs_searched: usize,
    pub matched_pairs: usize,
    pub unmatched_hyps: usize,
    pub unmatched_refs: usize,
}

impl MatchCounts {
    pub fn from_outcome(outcome: &MatchOutcome) -> Self {
        let diagnostics = &outcome.diagnostics;
        Self {
            hyps_searched: diagnostics.all_hyps.len(),
            refs_searched: diagnostics.all_refs.len(),
            matched_pairs: outcome.pairs.len(),
            unmatched_hyps: diagnostics.unmatched_hyps.len(),
            unmatched_refs: diagnostics.unmatched_refs.len(),
        }
    }
}

/// Serializes the summary report to `path` as pretty-printed JSON.
pub fn write_report(path: &Path, mapping_report: &MappingReport) -> Result<(), MappingError> {
    let context = path.display().to_string();
    let json = serde_json::to_string_pretty(mapping_report)
        .map_err(|e| MappingError::json(format!("serializing {context}"), e))?;
    std::fs::write(path, json).map_err(|e| MappingError::io(format!("writing {context}"), e))
}

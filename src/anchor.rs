//! Anchor-file adapter.
//!
//! An anchor file is the per-pair alignment artifact produced upstream: five
//! lines holding the artifact name, reference tokens, hypothesis tokens,
//! per-token operation labels, and the CSID counts. Rows 2-5 start with the
//! utterance id and a row label; whitespace runs are not significant.

use std::path::{Path, PathBuf};

use crate::error::MappingError;
use crate::types::{AnchorRecord, Csid, EditOp};

/// File-name separator between the hypothesis and reference ids.
pub const PAIR_SEPARATOR: &str = "_vs_";

/// Extension given to propagated anchor artifacts.
pub const ANCHOR_EXTENSION: &str = "anchor";

/// Parsed contents of one anchor file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorFile {
    /// Logical artifact name from the first line, `{hyp}_vs_{ref}` based.
    /// The on-disk file name is often a hash and carries no meaning.
    pub name: String,
    pub utt_id: String,
    pub ref_tokens: Vec<String>,
    pub hyp_tokens: Vec<String>,
    pub ops: Vec<EditOp>,
    pub csid: Csid,
}

impl AnchorFile {
    /// Hypothesis and reference ids from the artifact name's stem.
    pub fn pair_ids(&self) -> Result<(String, String), MappingError> {
        split_pair_name(name_stem(&self.name), &self.name)
    }
}

/// Parses one anchor file body. `context` names the source (typically the
/// file path) for error messages. Any structural violation is a hard error:
/// silently skipping a record would corrupt the downstream match set.
pub fn parse_anchor(text: &str, context: &str) -> Result<AnchorFile, MappingError> {
    let mut lines = text.lines();
    let name = lines
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| MappingError::parse(context, "missing artifact name line"))?
        .to_string();

    let (ref_utt, ref_tokens) = labeled_row(lines.next(), "ref", context)?;
    let (_, hyp_tokens) = labeled_row(lines.next(), "hyp", context)?;
    let (_, op_labels) = labeled_row(lines.next(), "op", context)?;
    let (_, csid_fields) = labeled_row(lines.next(), "#csid", context)?;

    let ops = op_labels
        .iter()
        .map(|label| {
            EditOp::from_label(label).ok_or_else(|| {
                MappingError::parse(context, format!("unknown op label '{label}'"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if csid_fields.len() != 4 {
        return Err(MappingError::parse(
            context,
            format!("expected 4 CSID fields, found {}", csid_fields.len()),
        ));
    }
    let mut counts = [0u32; 4];
    for (slot, field) in counts.iter_mut().zip(&csid_fields) {
        *slot = field.parse().map_err(|_| {
            MappingError::parse(context, format!("non-numeric CSID field '{field}'"))
        })?;
    }

    Ok(AnchorFile {
        name,
        utt_id: ref_utt,
        ref_tokens,
        hyp_tokens,
        ops,
        csid: Csid::new(counts[0], counts[1], counts[2], counts[3]),
    })
}

/// Reads and parses one anchor file from disk.
pub fn read_anchor_file(path: &Path) -> Result<AnchorFile, MappingError> {
    let context = path.display().to_string();
    let text = std::fs::read_to_string(path)
        .map_err(|e| MappingError::io(format!("reading anchor file {context}"), e))?;
    parse_anchor(&text, &context)
}

/// Reads one anchor file and reduces it to the matcher's record form,
/// retaining the on-disk path for artifact propagation.
pub fn record_from_file(path: &Path) -> Result<AnchorRecord, MappingError> {
    let anchor = read_anchor_file(path)?;
    let (hyp_id, ref_id) = anchor.pair_ids()?;
    Ok(AnchorRecord {
        hyp_id,
        ref_id,
        csid: anchor.csid,
        artifact: Some(path.to_path_buf()),
    })
}

/// Enumerates anchor files under `dir`, sorted by file name so that
/// first-seen tie-breaking downstream is reproducible across platforms.
/// Directory entries that are not regular files are skipped.
pub fn collect_anchor_paths(dir: &Path) -> Result<Vec<PathBuf>, MappingError> {
    let context = dir.display().to_string();
    let entries = std::fs::read_dir(dir)
        .map_err(|e| MappingError::io(format!("listing anchor directory {context}"), e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| MappingError::io(format!("listing anchor directory {context}"), e))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Canonical id a confirmed pair's artifact is propagated under.
pub fn canonical_pair_id(hyp_id: &str, ref_id: &str) -> String {
    format!("{hyp_id}_{ref_id}")
}

fn name_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

fn split_pair_name(stem: &str, context: &str) -> Result<(String, String), MappingError> {
    match stem.split_once(PAIR_SEPARATOR) {
        Some((hyp, reference)) if !hyp.is_empty() && !reference.is_empty() => {
            Ok((hyp.to_string(), reference.to_string()))
        }
        _ => Err(MappingError::parse(
            context,
            format!("artifact name '{stem}' is not of the form {{hyp}}{PAIR_SEPARATOR}{{ref}}"),
        )),
    }
}

/// Splits a row of the form `<utt_id> <label> <payload…>` after collapsing
/// whitespace runs. The row label itself is not enforced; upstream writers
/// vary in padding but not in column order.
fn labeled_row(
    line: Option<&str>,
    expected: &str,
    context: &str,
) -> Result<(String, Vec<String>), MappingError> {
    let line = line
        .ok_or_else(|| MappingError::parse(context, format!("missing {expected} line")))?;
    let mut fields = line.split_whitespace();
    let utt_id = fields
        .next()
        .ok_or_else(|| MappingError::parse(context, format!("empty {expected} line")))?
        .to_string();
    if fields.next().is_none() {
        return Err(MappingError::parse(
            context,
            format!("{expected} line is missing its row label"),
        ));
    }
    Ok((utt_id, fields.map(str::to_string).collect()))
}

//! Data-driven validation of the alignment engine: every small token-sequence
//! pair over a two-letter alphabet exhaustively, plus seeded random pairs
//! over a larger alphabet, each checked against an independent two-row
//! edit-distance implementation and the structural output invariants.

use std::env;

use corpus_align::align_tokens;
use libtest_mimic::{Arguments, Failed, Trial};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_RANDOM_CASES: usize = 200;
const DEFAULT_SAMPLE_SEED: u64 = 42;
const EXHAUSTIVE_ALPHABET: [&str; 2] = ["a", "b"];
const EXHAUSTIVE_MAX_LEN: usize = 4;
const RANDOM_ALPHABET: [&str; 3] = ["a", "b", "c"];
const RANDOM_MAX_LEN: usize = 8;
const SUITE_NAME: &str = "edit_distance_matches_reference";

fn main() {
    let args = Arguments::from_args();
    let seed = env_u64("CORPUS_ALIGN_IT_SEED", DEFAULT_SAMPLE_SEED);
    let random_cases = env_u64("CORPUS_ALIGN_IT_CASES", DEFAULT_RANDOM_CASES as u64) as usize;

    let sequences = enumerate_sequences(&EXHAUSTIVE_ALPHABET, EXHAUSTIVE_MAX_LEN);
    let mut tests = Vec::with_capacity(sequences.len() * sequences.len() + random_cases);
    for (i, source) in sequences.iter().enumerate() {
        for (j, target) in sequences.iter().enumerate() {
            let source = source.clone();
            let target = target.clone();
            tests.push(Trial::test(
                format!("{SUITE_NAME}::exhaustive::{i:02}_vs_{j:02}"),
                move || check_case(&source, &target).map_err(Failed::from),
            ));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for case in 0..random_cases {
        let source = random_sequence(&mut rng);
        let target = random_sequence(&mut rng);
        tests.push(Trial::test(
            format!("{SUITE_NAME}::random::{case:04}"),
            move || check_case(&source, &target).map_err(Failed::from),
        ));
    }

    libtest_mimic::run(&args, tests).exit();
}

fn check_case(source: &[String], target: &[String]) -> Result<(), String> {
    let source_tokens: Vec<&str> = source.iter().map(String::as_str).collect();
    let target_tokens: Vec<&str> = target.iter().map(String::as_str).collect();
    let alignment = align_tokens(&source_tokens, &target_tokens);
    let label = format!("{source_tokens:?} vs {target_tokens:?}");

    let expected = reference_distance(&source_tokens, &target_tokens) as u32;
    if alignment.distance != expected {
        return Err(format!(
            "{label}: distance {} does not match reference {expected}",
            alignment.distance
        ));
    }

    let csid = &alignment.csid;
    if csid.correct + csid.substitutions + csid.deletions != source_tokens.len() as u32 {
        return Err(format!("{label}: C+S+D does not cover the source length"));
    }
    if csid.correct + csid.substitutions + csid.insertions != target_tokens.len() as u32 {
        return Err(format!("{label}: C+S+I does not cover the target length"));
    }
    if csid.substitutions + csid.insertions + csid.deletions != alignment.distance {
        return Err(format!("{label}: S+I+D does not equal the distance"));
    }
    if alignment.ops.len() as u32 != csid.total() {
        return Err(format!("{label}: op path length disagrees with CSID total"));
    }

    check_annotation(&label, &alignment.annotated_source, &source_tokens)?;
    check_annotation(&label, &alignment.annotated_target, &target_tokens)?;

    if source_tokens == target_tokens && alignment.annotated_source.contains('[') {
        return Err(format!("{label}: identical sequences must not be bracketed"));
    }

    Ok(())
}

/// Brackets must be balanced and non-nested, and stripping them must
/// reproduce the input tokens exactly.
fn check_annotation(label: &str, annotated: &str, tokens: &[&str]) -> Result<(), String> {
    let mut depth = 0i32;
    let mut stripped = Vec::new();
    for part in annotated.split_whitespace() {
        match part {
            "[" => {
                depth += 1;
                if depth != 1 {
                    return Err(format!("{label}: nested '[' in {annotated:?}"));
                }
            }
            "]" => {
                depth -= 1;
                if depth != 0 {
                    return Err(format!("{label}: unbalanced ']' in {annotated:?}"));
                }
            }
            token => stripped.push(token),
        }
    }
    if depth != 0 {
        return Err(format!("{label}: unclosed span in {annotated:?}"));
    }
    if stripped != tokens {
        return Err(format!(
            "{label}: stripping brackets from {annotated:?} does not reproduce the input"
        ));
    }
    Ok(())
}

/// Plain two-row edit distance, kept independent of the engine under test.
fn reference_distance(a: &[&str], b: &[&str]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for i in 1..=long.len() {
        curr[0] = i;
        for j in 1..=m {
            let cost = usize::from(long[i - 1] != short[j - 1]);
            let deletion = prev[j] + 1;
            let insertion = curr[j - 1] + 1;
            let substitution = prev[j - 1] + cost;
            curr[j] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Every token sequence over `alphabet` with length 0..=`max_len`.
fn enumerate_sequences(alphabet: &[&str], max_len: usize) -> Vec<Vec<String>> {
    let mut sequences = vec![Vec::new()];
    let mut frontier = vec![Vec::<String>::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for sequence in &frontier {
            for token in alphabet {
                let mut extended = sequence.clone();
                extended.push((*token).to_string());
                next.push(extended);
            }
        }
        sequences.extend(next.iter().cloned());
        frontier = next;
    }
    sequences
}

fn random_sequence(rng: &mut StdRng) -> Vec<String> {
    let len = rng.gen_range(0..=RANDOM_MAX_LEN);
    (0..len)
        .map(|_| RANDOM_ALPHABET[rng.gen_range(0..RANDOM_ALPHABET.len())].to_string())
        .collect()
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use corpus_align::matching::report::{self, MappingReport, MatchCounts, Meta};
use corpus_align::{
    CandidateRanking, CorrectnessRatio, MappingConfig, MappingError, PrimaryMapperBuilder,
    RawMatchCount,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RankingChoice {
    /// Raw count of matching tokens (default).
    #[value(name = "raw-c")]
    RawC,
    /// Correctness ratio; prefers short clean overlaps over long weak ones.
    Ratio,
}

impl RankingChoice {
    fn ranking(self) -> Box<dyn CandidateRanking> {
        match self {
            Self::RawC => Box::new(RawMatchCount),
            Self::Ratio => Box::new(CorrectnessRatio),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "primary_mapping")]
#[command(about = "Pick and filter the best alignments between decoded clips and reference text")]
struct Args {
    /// Directory of anchor files produced by the text alignment step.
    #[arg(long, env = "CORPUS_ALIGN_ALIGNED_DIR")]
    aligned_dir: PathBuf,
    /// Directory the match results, stats, and propagated anchors are written to.
    #[arg(long, env = "CORPUS_ALIGN_OUTPUT_DIR")]
    output_dir: PathBuf,
    #[arg(
        long,
        env = "CORPUS_ALIGN_RANKING",
        value_enum,
        default_value_t = RankingChoice::RawC
    )]
    ranking: RankingChoice,
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "primary mapping failed");
        let mut cause = err.source();
        while let Some(source) = cause {
            error!(cause = %source, "caused by");
            cause = source.source();
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), MappingError> {
    let args = Args::parse();
    let config = MappingConfig::new(args.aligned_dir.clone(), args.output_dir.clone());
    let report_path = config.report_path();
    let aligned_dir = config.aligned_dir.display().to_string();

    let mapper = PrimaryMapperBuilder::new(config)
        .with_ranking(args.ranking.ranking())
        .build()?;
    let run = mapper.run()?;

    let summary = MappingReport {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            aligned_dir,
            record_count: run.record_count,
        },
        counts: MatchCounts::from_outcome(&run.outcome),
    };
    report::write_report(&report_path, &summary)?;

    tracing::info!(
        matched = run.outcome.pairs.len(),
        hyps = run.outcome.diagnostics.all_hyps.len(),
        refs = run.outcome.diagnostics.all_refs.len(),
        report = %report_path.display(),
        "primary mapping complete"
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

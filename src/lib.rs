pub mod alignment;
pub mod anchor;
pub mod config;
pub mod error;
pub mod matching;
pub mod pipeline;
pub mod types;

pub use alignment::{align, align_tokens, tokenize};
pub use anchor::AnchorFile;
pub use config::MappingConfig;
pub use error::MappingError;
pub use matching::report::{Diagnostics, DumpRecord, MappingReport, MatchCounts, Meta};
pub use matching::{resolve, CandidateRanking, CorrectnessRatio, MatchOutcome, MatchedPair, RawMatchCount};
pub use pipeline::builder::PrimaryMapperBuilder;
pub use pipeline::defaults::{DirectoryAnchorSource, FileMatchSink};
pub use pipeline::runtime::{MappingRun, PrimaryMapper};
pub use pipeline::traits::{AnchorSource, MatchSink};
pub use types::{Alignment, AnchorRecord, Csid, EditOp};

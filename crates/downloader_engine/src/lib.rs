//! Downloader engine: collaborator interfaces, their simulated
//! implementations, and the background runtime that executes effects.
mod engine;
mod filename;
mod keywords;
mod metadata;
mod settings;
mod types;
mod worker;

pub use engine::{EngineHandle, EngineServices};
pub use filename::deterministic_filename;
pub use keywords::{
    analyze, fallback_keywords, KeywordService, RandomScorer, RelevanceScorer, ScorerFactory,
    SimulatedKeywordService, FALLBACK_KEYWORDS, MAX_KEYWORDS, MAX_RELEVANCE, MIN_RELEVANCE,
};
pub use metadata::{MetadataFetcher, SimulatedMetadataFetcher};
pub use settings::EngineSettings;
pub use types::{
    DownloadConfig, DownloadError, DownloadFailure, DownloadOutcome, EngineEvent, FetchError,
    FetchFailure, Generation, Keyword, ProgressEvent, RunId, TimeWindow, VideoMetadata,
};
pub use worker::{ChannelProgressSink, DownloadWorker, ProgressSink, SimulatedDownloadWorker, StepFn};

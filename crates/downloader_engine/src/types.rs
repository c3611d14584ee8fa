use thiserror::Error;

pub type Generation = u64;
pub type RunId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub duration_seconds: u32,
    pub thumbnail_url: String,
}

/// Trim window passed to the worker, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    pub url: String,
    pub quality: String,
    pub audio_only: bool,
    pub time_range: Option<TimeWindow>,
    pub download_thumbnail: bool,
}

/// One progress report from a worker, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub saved_path: String,
    /// Set when a thumbnail was requested and written.
    pub thumbnail_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub word: String,
    pub relevance: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    MetadataReady {
        generation: Generation,
        result: Result<VideoMetadata, FetchError>,
    },
    DownloadProgress {
        generation: Generation,
        run: RunId,
        progress: ProgressEvent,
    },
    DownloadFinished {
        generation: Generation,
        run: RunId,
        result: Result<DownloadOutcome, DownloadError>,
    },
    KeywordsReady {
        generation: Generation,
        keywords: Vec<Keyword>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchFailure,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("invalid url")]
    InvalidUrl,
    #[error("video unavailable")]
    Unavailable,
    #[error("network error")]
    Network,
    #[error("internal error")]
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DownloadError {
    pub kind: DownloadFailure,
    pub message: String,
}

impl DownloadError {
    pub fn new(kind: DownloadFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadFailure {
    #[error("invalid download options")]
    InvalidConfig,
    #[error("network error")]
    Network,
    #[error("storage error")]
    Storage,
    #[error("internal error")]
    Internal,
}

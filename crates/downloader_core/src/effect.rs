use crate::{Generation, RunId, TimeRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Abandon every task scheduled for a generation older than `current`.
    CancelStale { current: Generation },
    FetchMetadata { generation: Generation, url: String },
    AnalyzeKeywords { generation: Generation, title: String },
    StartDownload {
        generation: Generation,
        run: RunId,
        request: DownloadRequest,
    },
}

/// Snapshot of the download options at activation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub quality: &'static str,
    pub audio_only: bool,
    /// `None` unless the time range toggle is on.
    pub time_range: Option<TimeRange>,
    pub download_thumbnail: bool,
}

use crate::{Generation, Keyword, RunId, VideoDetails};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// URL input gained or lost focus.
    InputFocusChanged(bool),
    /// User submitted the current URL input.
    UrlSubmitted,
    /// Metadata fetch finished for a session.
    MetadataLoaded {
        generation: Generation,
        details: VideoDetails,
    },
    /// Metadata fetch failed for a session.
    MetadataFailed {
        generation: Generation,
        message: String,
    },
    /// User picked the video (false) or audio (true) format.
    AudioOnlyChanged(bool),
    /// User clicked a quality tile, identified by its value.
    QualitySelected(String),
    UseTimeRangeToggled(bool),
    /// Either range control moved; carries both bounds in seconds.
    TimeRangeChanged { start: u32, end: u32 },
    DownloadThumbnailToggled(bool),
    AnalyzeKeywordsClicked,
    KeywordsAnalyzed {
        generation: Generation,
        keywords: Vec<Keyword>,
    },
    DownloadClicked,
    /// Worker progress in percent; may exceed 100.
    DownloadProgress {
        generation: Generation,
        run: RunId,
        percent: f64,
    },
    DownloadCompleted {
        generation: Generation,
        run: RunId,
        saved_path: String,
        thumbnail_saved: bool,
    },
    DownloadFailed {
        generation: Generation,
        run: RunId,
        message: String,
    },
    /// The transient notification has been shown.
    NotificationDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}

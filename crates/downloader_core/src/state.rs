use crate::catalog::{default_quality, find_quality, QualityOption};
use crate::effect::DownloadRequest;
use crate::keywords::{Keyword, KeywordPanel};
use crate::status::StatusMessage;
use crate::time_range::TimeRange;
use crate::validate::ValidationError;

/// Incremented on every accepted URL submit.
pub type Generation = u64;
/// Incremented on every download activation.
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Empty,
    AwaitingMetadata,
    Configuring,
    Downloading,
    Settled,
}

impl SessionPhase {
    pub fn is_processing(self) -> bool {
        matches!(
            self,
            SessionPhase::AwaitingMetadata | SessionPhase::Downloading
        )
    }

    /// Phases in which the download options may be edited.
    pub fn accepts_options(self) -> bool {
        matches!(self, SessionPhase::Configuring | SessionPhase::Settled)
    }
}

/// Metadata delivered by the fetcher for a submitted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: String,
    pub duration_seconds: u32,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    input_text: String,
    input_focused: bool,
    input_error: Option<ValidationError>,
    phase: SessionPhase,
    generation: Generation,
    run: RunId,
    url: String,
    video_title: String,
    video_duration_seconds: u32,
    thumbnail_url: String,
    selected_quality: &'static QualityOption,
    audio_only: bool,
    use_time_range: bool,
    time_range: TimeRange,
    download_thumbnail: bool,
    download_progress: f64,
    status: StatusMessage,
    saved_path: Option<String>,
    notification: Option<String>,
    keywords: KeywordPanel,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            input_focused: false,
            input_error: None,
            phase: SessionPhase::Empty,
            generation: 0,
            run: 0,
            url: String::new(),
            video_title: String::new(),
            video_duration_seconds: 0,
            thumbnail_url: String::new(),
            selected_quality: default_quality(false),
            audio_only: false,
            use_time_range: false,
            time_range: TimeRange::default(),
            download_thumbnail: false,
            download_progress: 0.0,
            status: StatusMessage::default(),
            saved_path: None,
            notification: None,
            keywords: KeywordPanel::Idle,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_processing(&self) -> bool {
        self.phase.is_processing()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // URL input

    pub(crate) fn set_input_text(&mut self, text: String) {
        if self.input_text != text || self.input_error.is_some() {
            self.input_text = text;
            self.input_error = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_input_focused(&mut self, focused: bool) {
        if self.input_focused != focused {
            self.input_focused = focused;
            self.mark_dirty();
        }
    }

    pub(crate) fn input_text(&self) -> &str {
        &self.input_text
    }

    pub(crate) fn reject_input(&mut self, error: ValidationError) {
        self.input_error = Some(error);
        self.mark_dirty();
    }

    /// Starts a fresh session for `url`: everything but the input box and the
    /// generation/run counters goes back to defaults.
    pub(crate) fn begin_session(&mut self, url: String) -> Generation {
        let generation = self.generation + 1;
        let run = self.run;
        let input_text = std::mem::take(&mut self.input_text);
        let input_focused = self.input_focused;
        *self = Self {
            input_text,
            input_focused,
            phase: SessionPhase::AwaitingMetadata,
            generation,
            run,
            url,
            ..Self::default()
        };
        self.mark_dirty();
        generation
    }

    pub(crate) fn apply_metadata(&mut self, details: VideoDetails) {
        self.video_title = details.title;
        self.video_duration_seconds = details.duration_seconds;
        self.thumbnail_url = details.thumbnail_url;
        // Duration changed: the range always restarts at the full media.
        self.time_range = TimeRange::full(details.duration_seconds);
        self.keywords = KeywordPanel::Idle;
        self.phase = SessionPhase::Configuring;
        self.notification = Some("Video details retrieved successfully".to_string());
        self.mark_dirty();
    }

    pub(crate) fn fail_metadata(&mut self, message: String) {
        self.url.clear();
        self.phase = SessionPhase::Empty;
        self.status = StatusMessage::error("Could not retrieve video details", Some(message));
        self.mark_dirty();
    }

    // Download options

    pub(crate) fn set_audio_only(&mut self, audio_only: bool) {
        if self.audio_only == audio_only {
            return;
        }
        self.audio_only = audio_only;
        self.selected_quality = default_quality(audio_only);
        self.mark_dirty();
    }

    pub(crate) fn select_quality(&mut self, value: &str) -> bool {
        match find_quality(self.audio_only, value) {
            Some(option) => {
                if self.selected_quality != option {
                    self.selected_quality = option;
                    self.mark_dirty();
                }
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_use_time_range(&mut self, enabled: bool) {
        if self.use_time_range != enabled {
            self.use_time_range = enabled;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_time_range(&mut self, start: u32, end: u32) {
        let range = TimeRange::clamped(start, end, self.video_duration_seconds);
        if self.time_range != range {
            self.time_range = range;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_download_thumbnail(&mut self, enabled: bool) {
        if self.download_thumbnail != enabled {
            self.download_thumbnail = enabled;
            self.mark_dirty();
        }
    }

    // Keyword analyzer

    /// Moves the panel from `Idle` to `Analyzing`; returns the title to analyze.
    pub(crate) fn begin_keyword_analysis(&mut self) -> Option<String> {
        if self.video_title.is_empty() || !self.keywords.is_idle() {
            return None;
        }
        self.keywords = KeywordPanel::Analyzing;
        self.mark_dirty();
        Some(self.video_title.clone())
    }

    pub(crate) fn settle_keywords(&mut self, keywords: Vec<Keyword>) {
        if self.keywords.is_analyzing() {
            self.keywords = KeywordPanel::Settled(keywords);
            self.mark_dirty();
        }
    }

    // Download lifecycle

    pub(crate) fn begin_download(&mut self) -> (RunId, DownloadRequest) {
        self.run += 1;
        self.phase = SessionPhase::Downloading;
        self.download_progress = 0.0;
        self.status = StatusMessage::default();
        self.saved_path = None;
        self.mark_dirty();

        let request = DownloadRequest {
            url: self.url.clone(),
            quality: self.selected_quality.value,
            audio_only: self.audio_only,
            time_range: self.use_time_range.then_some(self.time_range),
            download_thumbnail: self.download_thumbnail,
        };
        (self.run, request)
    }

    pub(crate) fn apply_progress(&mut self, percent: f64) {
        if percent.is_nan() {
            return;
        }
        let next = percent.clamp(0.0, 100.0);
        if next > self.download_progress {
            self.download_progress = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn complete_download(&mut self, saved_path: String, thumbnail_saved: bool) {
        self.download_progress = 100.0;
        self.phase = SessionPhase::Settled;
        self.status = if self.download_thumbnail && !thumbnail_saved {
            StatusMessage::warning(
                "Download completed with warnings",
                Some("Your file has been saved, but the thumbnail could not be saved.".to_string()),
            )
        } else {
            StatusMessage::success(
                "Download completed successfully!",
                Some("Your file has been saved to your downloads folder.".to_string()),
            )
        };
        self.saved_path = Some(saved_path);
        self.mark_dirty();
    }

    pub(crate) fn fail_download(&mut self, message: String) {
        self.phase = SessionPhase::Configuring;
        self.status = StatusMessage::error("Download failed", Some(message));
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.mark_dirty();
        }
    }

    /// True when the event tokens belong to the live session and download run.
    pub(crate) fn is_current_run(&self, generation: Generation, run: RunId) -> bool {
        self.generation == generation && self.run == run && self.phase == SessionPhase::Downloading
    }

    // Read access for the view model.

    pub(crate) fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub(crate) fn input_error(&self) -> Option<ValidationError> {
        self.input_error
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn video_title(&self) -> &str {
        &self.video_title
    }

    pub(crate) fn video_duration_seconds(&self) -> u32 {
        self.video_duration_seconds
    }

    pub(crate) fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub(crate) fn selected_quality(&self) -> &'static QualityOption {
        self.selected_quality
    }

    pub(crate) fn audio_only(&self) -> bool {
        self.audio_only
    }

    pub(crate) fn use_time_range(&self) -> bool {
        self.use_time_range
    }

    pub(crate) fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub(crate) fn download_thumbnail(&self) -> bool {
        self.download_thumbnail
    }

    pub(crate) fn download_progress(&self) -> f64 {
        self.download_progress
    }

    pub(crate) fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub(crate) fn saved_path(&self) -> Option<&str> {
        self.saved_path.as_deref()
    }

    pub(crate) fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub(crate) fn keywords(&self) -> &KeywordPanel {
        &self.keywords
    }
}

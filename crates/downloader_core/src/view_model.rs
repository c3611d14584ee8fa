use crate::catalog::qualities_for;
use crate::keywords::{KeywordPanel, RelevanceBand};
use crate::status::{StatusKind, StatusMessage};
use crate::time_range::format_time;
use crate::{AppState, SessionPhase};

pub const URL_PLACEHOLDER: &str = "Paste your YouTube URL here...";
pub const URL_HINT: &str = "Just paste a YouTube URL and select your download options";

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub phase: SessionPhase,
    pub is_processing: bool,
    pub url_input: UrlInputView,
    /// Present once a URL has been accepted.
    pub preview: Option<VideoPreviewView>,
    pub format: Option<FormatSelectorView>,
    /// Present once the media duration is known.
    pub time_range: Option<TimeRangeView>,
    pub thumbnail_option: Option<ThumbnailOptionView>,
    /// Present once the title is known.
    pub keywords: Option<KeywordPanelView>,
    pub status: Option<StatusBannerView>,
    pub button: DownloadButtonView,
    pub saved_path: Option<String>,
    pub notification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInputView {
    pub text: String,
    pub focused: bool,
    pub disabled: bool,
    pub can_submit: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPreviewView {
    pub url: String,
    /// Empty while metadata is still loading.
    pub title: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSelectorView {
    pub audio_only: bool,
    pub options: Vec<QualityTileView>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityTileView {
    pub label: &'static str,
    pub value: &'static str,
    pub badge: Option<&'static str>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRangeView {
    pub enabled: bool,
    pub disabled: bool,
    pub duration: u32,
    pub start: u32,
    pub end: u32,
    pub start_label: String,
    pub end_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailOptionView {
    pub enabled: bool,
    pub disabled: bool,
    pub hint: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordPanelView {
    Idle,
    Analyzing,
    Settled(Vec<KeywordTagView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTagView {
    pub word: String,
    pub relevance: u8,
    pub band: RelevanceBand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBannerView {
    pub kind: StatusKind,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonState {
    /// No URL loaded yet.
    Disabled,
    Idle,
    Processing { progress: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadButtonView {
    pub state: ButtonState,
    pub label: String,
    pub hint: Option<&'static str>,
}

impl DownloadButtonView {
    /// Only the idle button emits an activation.
    pub fn is_enabled(&self) -> bool {
        self.state == ButtonState::Idle
    }
}

/// Banner for a status; `None` when there is nothing to show.
pub fn status_banner(status: &StatusMessage) -> Option<StatusBannerView> {
    match status.kind {
        StatusKind::None => None,
        kind @ (StatusKind::Success | StatusKind::Warning | StatusKind::Error) => {
            Some(StatusBannerView {
                kind,
                message: status.message.clone(),
                details: status.details.clone().filter(|d| !d.is_empty()),
            })
        }
    }
}

pub fn download_button(has_url: bool, processing: bool, progress: f64) -> DownloadButtonView {
    if processing {
        let label = if progress > 0.0 {
            format!("Downloading... {}%", progress.round() as u32)
        } else {
            "Processing...".to_string()
        };
        return DownloadButtonView {
            state: ButtonState::Processing { progress },
            label,
            hint: None,
        };
    }
    if !has_url {
        return DownloadButtonView {
            state: ButtonState::Disabled,
            label: "Download Now".to_string(),
            hint: None,
        };
    }
    DownloadButtonView {
        state: ButtonState::Idle,
        label: "Download Now".to_string(),
        hint: Some("Click to start your download"),
    }
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let processing = self.is_processing();
        let has_url = !self.url().is_empty();

        let url_input = UrlInputView {
            text: self.input_text().to_string(),
            focused: self.input_focused(),
            disabled: processing,
            can_submit: !processing && !self.input_text().trim().is_empty(),
            error: self.input_error().map(|err| err.to_string()),
        };

        let preview = has_url.then(|| VideoPreviewView {
            url: self.url().to_string(),
            title: self.video_title().to_string(),
            thumbnail_url: Some(self.thumbnail_url())
                .filter(|url| !url.is_empty())
                .map(ToOwned::to_owned),
        });

        let format = has_url.then(|| {
            let selected = self.selected_quality();
            FormatSelectorView {
                audio_only: self.audio_only(),
                options: qualities_for(self.audio_only())
                    .iter()
                    .map(|option| QualityTileView {
                        label: option.label,
                        value: option.value,
                        badge: option.badge,
                        selected: option.value == selected.value,
                    })
                    .collect(),
                disabled: processing,
            }
        });

        let duration = self.video_duration_seconds();
        let time_range = (has_url && duration > 0).then(|| {
            let range = self.time_range();
            TimeRangeView {
                enabled: self.use_time_range(),
                disabled: processing,
                duration,
                start: range.start,
                end: range.end,
                start_label: format_time(range.start),
                end_label: format_time(range.end),
            }
        });

        let thumbnail_option = has_url.then(|| ThumbnailOptionView {
            enabled: self.download_thumbnail(),
            disabled: processing,
            hint: self
                .download_thumbnail()
                .then_some("The video thumbnail will be saved along with your download"),
        });

        let keywords = (has_url && !self.video_title().is_empty()).then(|| match self.keywords() {
            KeywordPanel::Idle => KeywordPanelView::Idle,
            KeywordPanel::Analyzing => KeywordPanelView::Analyzing,
            KeywordPanel::Settled(keywords) => KeywordPanelView::Settled(
                keywords
                    .iter()
                    .map(|keyword| KeywordTagView {
                        word: keyword.word.clone(),
                        relevance: keyword.relevance,
                        band: keyword.band(),
                    })
                    .collect(),
            ),
        });

        AppViewModel {
            phase: self.phase(),
            is_processing: processing,
            url_input,
            preview,
            format,
            time_range,
            thumbnail_option,
            keywords,
            status: status_banner(self.status()),
            button: download_button(has_url, processing, self.download_progress()),
            saved_path: self.saved_path().map(ToOwned::to_owned),
            notification: self.notification().map(ToOwned::to_owned),
        }
    }
}

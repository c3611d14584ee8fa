//! Downloader core: pure session state machine and view-model helpers.
mod catalog;
mod effect;
mod keywords;
mod msg;
mod state;
mod status;
mod time_range;
mod update;
mod validate;
mod view_model;

pub use catalog::{
    default_quality, find_quality, qualities_for, QualityOption, AUDIO_QUALITIES,
    DEFAULT_AUDIO_QUALITY, DEFAULT_VIDEO_QUALITY, VIDEO_QUALITIES,
};
pub use effect::{DownloadRequest, Effect};
pub use keywords::{Keyword, KeywordPanel, RelevanceBand};
pub use msg::Msg;
pub use state::{AppState, Generation, RunId, SessionPhase, VideoDetails};
pub use status::{StatusKind, StatusMessage};
pub use time_range::{format_time, parse_time, TimeRange};
pub use update::update;
pub use validate::{validate_url, ValidationError};
pub use view_model::{
    download_button, status_banner, AppViewModel, ButtonState, DownloadButtonView,
    FormatSelectorView, KeywordPanelView, KeywordTagView, QualityTileView, StatusBannerView,
    ThumbnailOptionView, TimeRangeView, UrlInputView, VideoPreviewView, URL_HINT,
    URL_PLACEHOLDER,
};

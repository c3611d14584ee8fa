/// Immutable descriptor of one selectable quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityOption {
    pub id: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub audio_only: bool,
    /// Short badge shown next to the label (e.g. "HD").
    pub badge: Option<&'static str>,
}

impl QualityOption {
    const fn video(value: &'static str, badge: Option<&'static str>) -> Self {
        Self {
            id: value,
            label: value,
            value,
            audio_only: false,
            badge,
        }
    }

    const fn audio(value: &'static str, label: &'static str) -> Self {
        Self {
            id: value,
            label,
            value,
            audio_only: true,
            badge: None,
        }
    }
}

pub static VIDEO_QUALITIES: [QualityOption; 6] = [
    QualityOption::video("1080p", Some("HD")),
    QualityOption::video("720p", Some("HD")),
    QualityOption::video("480p", None),
    QualityOption::video("360p", None),
    QualityOption::video("240p", None),
    QualityOption::video("144p", None),
];

pub static AUDIO_QUALITIES: [QualityOption; 6] = [
    QualityOption::audio("320kbps", "320 kbps"),
    QualityOption::audio("256kbps", "256 kbps"),
    QualityOption::audio("192kbps", "192 kbps"),
    QualityOption::audio("128kbps", "128 kbps"),
    QualityOption::audio("96kbps", "96 kbps"),
    QualityOption::audio("64kbps", "64 kbps"),
];

pub const DEFAULT_VIDEO_QUALITY: &str = "720p";
pub const DEFAULT_AUDIO_QUALITY: &str = "320kbps";

/// The six options offered for the given format mode.
pub fn qualities_for(audio_only: bool) -> &'static [QualityOption; 6] {
    if audio_only {
        &AUDIO_QUALITIES
    } else {
        &VIDEO_QUALITIES
    }
}

/// Canonical default tier for a format mode.
pub fn default_quality(audio_only: bool) -> &'static QualityOption {
    let value = if audio_only {
        DEFAULT_AUDIO_QUALITY
    } else {
        DEFAULT_VIDEO_QUALITY
    };
    find_quality(audio_only, value).unwrap_or(&qualities_for(audio_only)[0])
}

/// Looks up `value` in the subset for the given mode only; cross-mode values
/// return `None`.
pub fn find_quality(audio_only: bool, value: &str) -> Option<&'static QualityOption> {
    qualities_for(audio_only)
        .iter()
        .find(|option| option.value == value)
}

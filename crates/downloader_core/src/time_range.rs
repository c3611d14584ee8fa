/// Trim window within the media, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    /// The whole media: `{0, duration}`.
    pub fn full(duration: u32) -> Self {
        Self {
            start: 0,
            end: duration,
        }
    }

    /// Clamps raw control values so that `start <= end <= duration`.
    pub fn clamped(start: u32, end: u32, duration: u32) -> Self {
        let end = end.min(duration);
        let start = start.min(end);
        Self { start, end }
    }
}

/// `m:ss` below one hour, `hh:mm:ss` otherwise.
pub fn format_time(seconds: u32) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Inverse of [`format_time`]; also accepts plain seconds.
pub fn parse_time(text: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    for (index, part) in parts.iter().enumerate() {
        let value: u32 = part.parse().ok()?;
        // Every component after the first is a base-60 digit.
        if index > 0 && value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total)
}

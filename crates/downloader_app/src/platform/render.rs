//! Text rendering of the view-model, one line per widget row.

use downloader_core::{
    format_time, AppViewModel, ButtonState, KeywordPanelView, RelevanceBand, StatusKind,
    URL_HINT, URL_PLACEHOLDER,
};

pub const TITLE: &str = "YouTube Downloader";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("== {TITLE} ==")];

    let input = &view.url_input;
    let text = if input.text.is_empty() {
        URL_PLACEHOLDER
    } else {
        input.text.as_str()
    };
    let lock = if input.disabled { " (locked)" } else { "" };
    lines.push(format!("URL: {text}{lock}"));
    match &input.error {
        Some(error) => lines.push(format!("  ! {error}")),
        None if view.preview.is_none() => lines.push(format!("  {URL_HINT}")),
        None => {}
    }

    if let Some(preview) = &view.preview {
        if preview.title.is_empty() {
            lines.push("Video: loading details...".to_string());
        } else {
            lines.push(format!("Video: {}", preview.title));
        }
        if let Some(thumbnail) = &preview.thumbnail_url {
            lines.push(format!("  thumbnail {thumbnail}"));
        }
    }

    if let Some(format) = &view.format {
        let (video, audio) = if format.audio_only {
            (" ", "*")
        } else {
            ("*", " ")
        };
        lines.push(format!("Format: [{video}] video  [{audio}] audio"));
        let tiles: Vec<String> = format
            .options
            .iter()
            .map(|tile| {
                let mark = if tile.selected { '*' } else { ' ' };
                match tile.badge {
                    Some(badge) => format!("[{mark}] {} {badge}", tile.label),
                    None => format!("[{mark}] {}", tile.label),
                }
            })
            .collect();
        lines.push(format!("  {}", tiles.join("  ")));
    }

    if let Some(range) = &view.time_range {
        if range.enabled {
            lines.push(format!(
                "Time range: {} - {} of {}",
                range.start_label,
                range.end_label,
                format_time(range.duration)
            ));
        } else {
            lines.push(format!("Time range: full video ({})", format_time(range.duration)));
        }
    }

    if let Some(thumbnail) = &view.thumbnail_option {
        let mark = if thumbnail.enabled { 'x' } else { ' ' };
        lines.push(format!("[{mark}] Download thumbnail"));
        if let Some(hint) = thumbnail.hint {
            lines.push(format!("  {hint}"));
        }
    }

    if let Some(panel) = &view.keywords {
        match panel {
            KeywordPanelView::Idle => lines.push("Keywords: (analyze to generate)".to_string()),
            KeywordPanelView::Analyzing => lines.push("Keywords: Analyzing...".to_string()),
            KeywordPanelView::Settled(tags) => {
                let tags: Vec<String> = tags
                    .iter()
                    .map(|tag| format!("#{} {}% {}", tag.word, tag.relevance, band_label(tag.band)))
                    .collect();
                lines.push(format!("Keywords: {}", tags.join(", ")));
            }
        }
    }

    if let Some(status) = &view.status {
        let tag = match status.kind {
            StatusKind::Success => "OK",
            StatusKind::Warning => "WARN",
            StatusKind::Error => "ERROR",
            StatusKind::None => "",
        };
        lines.push(format!("[{tag}] {}", status.message));
        if let Some(details) = &status.details {
            lines.push(format!("  {details}"));
        }
    }
    if let Some(path) = &view.saved_path {
        lines.push(format!("Saved to {path}"));
    }

    let button = &view.button;
    let bar = match button.state {
        ButtonState::Processing { progress } if progress > 0.0 => progress_bar(progress),
        _ => String::new(),
    };
    let label = match button.state {
        ButtonState::Disabled => format!("( {} )", button.label),
        ButtonState::Idle | ButtonState::Processing { .. } => format!("[ {} ]", button.label),
    };
    lines.push(format!("{label}{bar}"));
    if let Some(hint) = button.hint {
        lines.push(format!("  {hint}"));
    }

    if let Some(notification) = &view.notification {
        lines.push(format!(">> {notification}"));
    }
    lines
}

fn band_label(band: RelevanceBand) -> &'static str {
    match band {
        RelevanceBand::High => "(high)",
        RelevanceBand::Medium => "(medium)",
        RelevanceBand::Low => "(low)",
        RelevanceBand::Minimal => "(minimal)",
    }
}

fn progress_bar(progress: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((progress.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize;
    format!(" {}{}", "#".repeat(filled), ".".repeat(WIDTH - filled))
}

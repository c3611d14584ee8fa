use crate::validate::validate_url;
use crate::{AppState, Effect, Msg, SessionPhase};

/// Pure update function: applies a message to state and returns any effects.
///
/// Events from the engine carry the generation (and run) they were scheduled
/// for; anything addressed to an older session or download run is dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            if !state.is_processing() {
                state.set_input_text(text);
            }
            Vec::new()
        }
        Msg::InputFocusChanged(focused) => {
            if !state.is_processing() {
                state.set_input_focused(focused);
            }
            Vec::new()
        }
        Msg::UrlSubmitted => {
            if state.is_processing() {
                return (state, Vec::new());
            }
            match validate_url(state.input_text()) {
                Ok(url) => {
                    let previous = state.generation();
                    let generation = state.begin_session(url.clone());
                    let mut effects = Vec::with_capacity(2);
                    if previous > 0 {
                        effects.push(Effect::CancelStale {
                            current: generation,
                        });
                    }
                    effects.push(Effect::FetchMetadata { generation, url });
                    effects
                }
                Err(err) => {
                    state.reject_input(err);
                    Vec::new()
                }
            }
        }
        Msg::MetadataLoaded {
            generation,
            details,
        } => {
            if generation == state.generation() && state.phase() == SessionPhase::AwaitingMetadata
            {
                state.apply_metadata(details);
            }
            Vec::new()
        }
        Msg::MetadataFailed {
            generation,
            message,
        } => {
            if generation == state.generation() && state.phase() == SessionPhase::AwaitingMetadata
            {
                state.fail_metadata(message);
            }
            Vec::new()
        }
        Msg::AudioOnlyChanged(audio_only) => {
            if state.phase().accepts_options() {
                state.set_audio_only(audio_only);
            }
            Vec::new()
        }
        Msg::QualitySelected(value) => {
            if state.phase().accepts_options() {
                // Values outside the active mode's subset are ignored.
                state.select_quality(&value);
            }
            Vec::new()
        }
        Msg::UseTimeRangeToggled(enabled) => {
            if state.phase().accepts_options() {
                state.set_use_time_range(enabled);
            }
            Vec::new()
        }
        Msg::TimeRangeChanged { start, end } => {
            if state.phase().accepts_options() {
                state.set_time_range(start, end);
            }
            Vec::new()
        }
        Msg::DownloadThumbnailToggled(enabled) => {
            if state.phase().accepts_options() {
                state.set_download_thumbnail(enabled);
            }
            Vec::new()
        }
        Msg::AnalyzeKeywordsClicked => match state.begin_keyword_analysis() {
            Some(title) => vec![Effect::AnalyzeKeywords {
                generation: state.generation(),
                title,
            }],
            None => Vec::new(),
        },
        Msg::KeywordsAnalyzed {
            generation,
            keywords,
        } => {
            if generation == state.generation() {
                state.settle_keywords(keywords);
            }
            Vec::new()
        }
        Msg::DownloadClicked => {
            // The button is only live while configuring or after a finished run.
            if state.phase().accepts_options() {
                let (run, request) = state.begin_download();
                vec![Effect::StartDownload {
                    generation: state.generation(),
                    run,
                    request,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::DownloadProgress {
            generation,
            run,
            percent,
        } => {
            if state.is_current_run(generation, run) {
                state.apply_progress(percent);
            }
            Vec::new()
        }
        Msg::DownloadCompleted {
            generation,
            run,
            saved_path,
            thumbnail_saved,
        } => {
            if state.is_current_run(generation, run) {
                state.complete_download(saved_path, thumbnail_saved);
            }
            Vec::new()
        }
        Msg::DownloadFailed {
            generation,
            run,
            message,
        } => {
            if state.is_current_run(generation, run) {
                state.fail_download(message);
            }
            Vec::new()
        }
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

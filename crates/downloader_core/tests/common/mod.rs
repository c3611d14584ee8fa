#![allow(dead_code)]

use std::sync::Once;

use downloader_core::{update, AppState, Effect, Generation, Msg, RunId, VideoDetails};

pub const SAMPLE_TITLE: &str = "Sample YouTube Video - Amazing Content";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::UrlSubmitted)
}

pub fn sample_details(duration_seconds: u32) -> VideoDetails {
    VideoDetails {
        title: SAMPLE_TITLE.to_string(),
        duration_seconds,
        thumbnail_url: "https://via.placeholder.com/480x360".to_string(),
    }
}

/// Submits a URL and delivers metadata, leaving the session in `Configuring`.
pub fn configured_session(duration_seconds: u32) -> AppState {
    let (state, effects) = submit_url(AppState::new(), "https://youtu.be/abc123");
    let generation = fetch_generation(&effects).expect("fetch effect");
    let (state, _) = update(
        state,
        Msg::MetadataLoaded {
            generation,
            details: sample_details(duration_seconds),
        },
    );
    state
}

pub fn fetch_generation(effects: &[Effect]) -> Option<Generation> {
    effects.iter().find_map(|effect| match effect {
        Effect::FetchMetadata { generation, .. } => Some(*generation),
        _ => None,
    })
}

pub fn download_tokens(effects: &[Effect]) -> Option<(Generation, RunId)> {
    effects.iter().find_map(|effect| match effect {
        Effect::StartDownload {
            generation, run, ..
        } => Some((*generation, *run)),
        _ => None,
    })
}

mod common;

use common::{configured_session, init_logging, submit_url};
use downloader_core::{
    default_quality, find_quality, qualities_for, update, AppState, AppViewModel, Msg,
    AUDIO_QUALITIES, VIDEO_QUALITIES,
};
use pretty_assertions::assert_eq;

fn selected_value(view: &AppViewModel) -> &'static str {
    let format = view.format.as_ref().expect("format selector");
    let selected: Vec<_> = format.options.iter().filter(|tile| tile.selected).collect();
    assert_eq!(selected.len(), 1, "exactly one tile is selected");
    selected[0].value
}

fn assert_quality_matches_mode(state: &AppState) {
    let view = state.view();
    let format = view.format.as_ref().expect("format selector");
    let value = selected_value(&view);
    assert!(
        find_quality(format.audio_only, value).is_some(),
        "{value} does not belong to audio_only={}",
        format.audio_only
    );
}

#[test]
fn catalog_has_six_tiers_per_mode() {
    assert_eq!(VIDEO_QUALITIES.len(), 6);
    assert_eq!(AUDIO_QUALITIES.len(), 6);
    assert!(VIDEO_QUALITIES.iter().all(|q| !q.audio_only));
    assert!(AUDIO_QUALITIES.iter().all(|q| q.audio_only));
    assert_eq!(default_quality(false).value, "720p");
    assert_eq!(default_quality(true).value, "320kbps");
    assert_eq!(qualities_for(true)[0].label, "320 kbps");
    assert_eq!(find_quality(false, "320kbps"), None);
}

#[test]
fn grid_shows_the_six_options_of_the_active_mode() {
    init_logging();
    let state = configured_session(360);
    let values: Vec<_> = state
        .view()
        .format
        .unwrap()
        .options
        .iter()
        .map(|tile| tile.value)
        .collect();
    assert_eq!(values, vec!["1080p", "720p", "480p", "360p", "240p", "144p"]);

    let (state, _) = update(state, Msg::AudioOnlyChanged(true));
    let values: Vec<_> = state
        .view()
        .format
        .unwrap()
        .options
        .iter()
        .map(|tile| tile.value)
        .collect();
    assert_eq!(
        values,
        vec!["320kbps", "256kbps", "192kbps", "128kbps", "96kbps", "64kbps"]
    );
}

#[test]
fn switching_mode_resets_to_mode_default() {
    init_logging();
    let state = configured_session(360);
    let (state, _) = update(state, Msg::QualitySelected("1080p".to_string()));
    assert_eq!(selected_value(&state.view()), "1080p");

    let (state, _) = update(state, Msg::AudioOnlyChanged(true));
    assert_eq!(selected_value(&state.view()), "320kbps");

    let (state, _) = update(state, Msg::QualitySelected("96kbps".to_string()));
    let (state, _) = update(state, Msg::AudioOnlyChanged(false));
    assert_eq!(selected_value(&state.view()), "720p");
}

#[test]
fn reselecting_current_mode_keeps_selection() {
    init_logging();
    let state = configured_session(360);
    let (state, _) = update(state, Msg::QualitySelected("480p".to_string()));
    let (mut state, _) = update(state, Msg::AudioOnlyChanged(false));
    assert_eq!(selected_value(&state.view()), "480p");
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::AudioOnlyChanged(false));
    assert!(!state.consume_dirty());
}

#[test]
fn cross_mode_quality_is_rejected() {
    init_logging();
    let state = configured_session(360);
    let (state, _) = update(state, Msg::QualitySelected("128kbps".to_string()));
    assert_eq!(selected_value(&state.view()), "720p");

    let (state, _) = update(state, Msg::QualitySelected("4k".to_string()));
    assert_eq!(selected_value(&state.view()), "720p");
}

#[test]
fn quality_always_matches_mode_across_toggle_sequences() {
    init_logging();
    let toggles = [true, true, false, true, false, false, true];
    let picks = ["1080p", "64kbps", "144p", "192kbps", "360p", "256kbps", "240p"];

    let mut state = configured_session(360);
    assert_quality_matches_mode(&state);
    for (audio_only, pick) in toggles.into_iter().zip(picks) {
        state = update(state, Msg::AudioOnlyChanged(audio_only)).0;
        assert_quality_matches_mode(&state);
        state = update(state, Msg::QualitySelected(pick.to_string())).0;
        assert_quality_matches_mode(&state);
    }
}

#[test]
fn options_are_frozen_while_processing() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://youtu.be/abc123");
    let (state, _) = update(state, Msg::AudioOnlyChanged(true));
    let (state, _) = update(state, Msg::DownloadThumbnailToggled(true));
    let view = state.view();
    let format = view.format.as_ref().unwrap();
    assert!(format.disabled);
    assert!(!format.audio_only);
    assert!(!view.thumbnail_option.as_ref().unwrap().enabled);

    let state = configured_session(360);
    let (state, _) = update(state, Msg::DownloadClicked);
    let (state, _) = update(state, Msg::UseTimeRangeToggled(true));
    let (state, _) = update(state, Msg::QualitySelected("144p".to_string()));
    let view = state.view();
    assert!(!view.time_range.as_ref().unwrap().enabled);
    assert!(view.time_range.as_ref().unwrap().disabled);
    assert_eq!(selected_value(&view), "720p");
}

#[test]
fn time_range_is_clamped_to_duration_and_ordered() {
    init_logging();
    let state = configured_session(360);
    let (state, _) = update(state, Msg::UseTimeRangeToggled(true));

    let (state, _) = update(state, Msg::TimeRangeChanged { start: 30, end: 90 });
    let range = state.view().time_range.unwrap();
    assert_eq!((range.start, range.end), (30, 90));
    assert_eq!(range.start_label, "0:30");
    assert_eq!(range.end_label, "1:30");

    let (state, _) = update(state, Msg::TimeRangeChanged { start: 30, end: 999 });
    let range = state.view().time_range.unwrap();
    assert_eq!((range.start, range.end), (30, 360));

    let (state, _) = update(state, Msg::TimeRangeChanged { start: 200, end: 100 });
    let range = state.view().time_range.unwrap();
    assert!(range.start <= range.end);
    assert_eq!((range.start, range.end), (100, 100));
}

#[test]
fn thumbnail_toggle_shows_hint() {
    init_logging();
    let state = configured_session(360);
    assert_eq!(state.view().thumbnail_option.unwrap().hint, None);

    let (state, _) = update(state, Msg::DownloadThumbnailToggled(true));
    let option = state.view().thumbnail_option.unwrap();
    assert!(option.enabled);
    assert!(option.hint.is_some());
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use downloader_engine::{
    fallback_keywords, DownloadConfig, DownloadError, DownloadFailure, DownloadOutcome,
    DownloadWorker, EngineEvent, EngineHandle, EngineServices, EngineSettings, FetchError,
    FetchFailure, Keyword, KeywordService, MetadataFetcher, ProgressSink, RelevanceScorer,
    SimulatedDownloadWorker, SimulatedKeywordService, SimulatedMetadataFetcher, VideoMetadata,
};

struct FlatScorer;

impl RelevanceScorer for FlatScorer {
    fn score(&mut self, _word: &str) -> u8 {
        60
    }
}

/// Collaborator that panics as soon as it is polled.
struct Exploding;

#[async_trait::async_trait]
impl MetadataFetcher for Exploding {
    async fn fetch(&self, _url: &str) -> Result<VideoMetadata, FetchError> {
        panic!("metadata collaborator exploded")
    }
}

#[async_trait::async_trait]
impl DownloadWorker for Exploding {
    async fn run(
        &self,
        _config: &DownloadConfig,
        _sink: &dyn ProgressSink,
    ) -> Result<DownloadOutcome, DownloadError> {
        panic!("download collaborator exploded")
    }
}

#[async_trait::async_trait]
impl KeywordService for Exploding {
    async fn analyze(&self, _title: &str) -> Vec<Keyword> {
        panic!("keyword collaborator exploded")
    }
}

fn fast_settings() -> EngineSettings {
    EngineSettings {
        metadata_delay: Duration::from_millis(5),
        progress_interval: Duration::from_millis(5),
        settle_delay: Duration::from_millis(5),
        keyword_delay: Duration::from_millis(5),
        ..EngineSettings::default()
    }
}

fn services(settings: &EngineSettings, step: f64) -> EngineServices {
    EngineServices {
        metadata: Arc::new(SimulatedMetadataFetcher::new(settings)),
        worker: Arc::new(SimulatedDownloadWorker::new(settings).with_step(Arc::new(move || step))),
        keywords: Arc::new(SimulatedKeywordService::new(settings).with_scorer(Arc::new(
            || -> Box<dyn RelevanceScorer + Send> { Box::new(FlatScorer) },
        ))),
    }
}

fn config() -> DownloadConfig {
    DownloadConfig {
        url: "https://youtu.be/abc123".to_string(),
        quality: "720p".to_string(),
        audio_only: false,
        time_range: None,
        download_thumbnail: false,
    }
}

/// Collects events until `done` matches one or the deadline passes.
fn collect_until(
    engine: &EngineHandle,
    deadline: Duration,
    done: impl Fn(&EngineEvent) -> bool,
) -> Vec<EngineEvent> {
    let start = Instant::now();
    let mut events = Vec::new();
    while start.elapsed() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(10)) {
            let finished = done(&event);
            events.push(event);
            if finished {
                break;
            }
        }
    }
    events
}

#[test]
fn metadata_and_keywords_round_trip_through_the_engine() {
    let settings = fast_settings();
    let engine = EngineHandle::new(services(&settings, 50.0));

    engine.fetch_metadata(1, "https://youtu.be/abc123");
    let events = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::MetadataReady { .. })
    });
    match events.last() {
        Some(EngineEvent::MetadataReady {
            generation: 1,
            result: Ok(metadata),
        }) => assert_eq!(metadata.duration_seconds, 360),
        other => panic!("unexpected event: {other:?}"),
    }

    engine.analyze_keywords(1, "Amazing Content");
    let events = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::KeywordsReady { .. })
    });
    match events.last() {
        Some(EngineEvent::KeywordsReady {
            generation: 1,
            keywords,
        }) => assert_eq!(keywords.len(), 5),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn download_reports_progress_then_completion() {
    let settings = fast_settings();
    let engine = EngineHandle::new(services(&settings, 40.0));

    engine.fetch_metadata(1, "https://youtu.be/abc123");
    engine.start_download(1, 1, config());
    let events = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::DownloadFinished { .. })
    });

    let percents: Vec<f64> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::DownloadProgress {
                generation: 1,
                run: 1,
                progress,
            } => Some(progress.percent),
            _ => None,
        })
        .collect();
    assert_eq!(percents, vec![40.0, 80.0, 100.0]);
    assert!(matches!(
        events.last(),
        Some(EngineEvent::DownloadFinished {
            generation: 1,
            run: 1,
            result: Ok(_),
        })
    ));
}

#[test]
fn new_generation_cancels_the_running_download() {
    let settings = EngineSettings {
        progress_interval: Duration::from_millis(30),
        settle_delay: Duration::from_millis(300),
        ..fast_settings()
    };
    let engine = EngineHandle::new(services(&settings, 50.0));

    engine.start_download(1, 1, config());
    let first = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::DownloadProgress { .. })
    });
    assert!(!first.is_empty());

    engine.cancel_stale(2);
    let rest = collect_until(&engine, Duration::from_millis(600), |_| false);
    assert!(
        rest.iter()
            .all(|event| !matches!(event, EngineEvent::DownloadFinished { .. })),
        "{rest:?}"
    );

    // Commands for the old generation are dropped outright.
    engine.start_download(1, 2, config());
    let stale = collect_until(&engine, Duration::from_millis(300), |_| false);
    assert!(stale.is_empty(), "{stale:?}");
}

#[test]
fn starting_a_new_run_cancels_the_previous_one() {
    let settings = EngineSettings {
        progress_interval: Duration::from_millis(30),
        settle_delay: Duration::from_millis(300),
        ..fast_settings()
    };
    let engine = EngineHandle::new(services(&settings, 50.0));

    engine.start_download(1, 1, config());
    engine.start_download(1, 2, config());
    let events = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::DownloadFinished { .. })
    });

    assert!(matches!(
        events.last(),
        Some(EngineEvent::DownloadFinished { run: 2, .. })
    ));
    assert!(events.iter().all(|event| !matches!(
        event,
        EngineEvent::DownloadProgress { run: 1, .. } | EngineEvent::DownloadFinished { run: 1, .. }
    )));
}

#[test]
fn panicking_collaborators_still_produce_terminal_events() {
    let engine = EngineHandle::new(EngineServices {
        metadata: Arc::new(Exploding),
        worker: Arc::new(Exploding),
        keywords: Arc::new(Exploding),
    });

    engine.fetch_metadata(1, "https://youtu.be/abc123");
    let events = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::MetadataReady { .. })
    });
    match events.last() {
        Some(EngineEvent::MetadataReady {
            generation: 1,
            result: Err(err),
        }) => assert_eq!(err.kind, FetchFailure::Internal),
        other => panic!("unexpected event: {other:?}"),
    }

    engine.start_download(1, 1, config());
    let events = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::DownloadFinished { .. })
    });
    match events.last() {
        Some(EngineEvent::DownloadFinished {
            generation: 1,
            run: 1,
            result: Err(err),
        }) => assert_eq!(err.kind, DownloadFailure::Internal),
        other => panic!("unexpected event: {other:?}"),
    }

    engine.analyze_keywords(1, "Amazing Content");
    let events = collect_until(&engine, Duration::from_secs(5), |event| {
        matches!(event, EngineEvent::KeywordsReady { .. })
    });
    match events.last() {
        Some(EngineEvent::KeywordsReady {
            generation: 1,
            keywords,
        }) => assert_eq!(keywords, &fallback_keywords()),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn unbounded_progress_step_falls_back_to_default() {
    let settings = EngineSettings {
        max_progress_step: f64::INFINITY,
        ..fast_settings()
    };
    let engine = EngineHandle::new(EngineServices::simulated(&settings));

    engine.start_download(1, 1, config());
    let events = collect_until(&engine, Duration::from_secs(10), |event| {
        matches!(event, EngineEvent::DownloadFinished { .. })
    });
    assert!(
        matches!(
            events.last(),
            Some(EngineEvent::DownloadFinished {
                generation: 1,
                run: 1,
                result: Ok(_),
            })
        ),
        "{events:?}"
    );
}

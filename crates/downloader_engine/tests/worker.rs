use std::sync::{Arc, Mutex};
use std::time::Duration;

use downloader_engine::{
    deterministic_filename, DownloadConfig, DownloadFailure, DownloadWorker, EngineSettings,
    FetchFailure, MetadataFetcher, ProgressEvent, ProgressSink, SimulatedDownloadWorker,
    SimulatedMetadataFetcher, TimeWindow,
};
use pretty_assertions::assert_eq;
use tokio::time::Instant;

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<(Duration, f64)>>>,
    started: Option<Instant>,
}

impl TestSink {
    fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            started: Some(Instant::now()),
        }
    }

    fn take(&self) -> Vec<(Duration, f64)> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: ProgressEvent) {
        let at = self.started.map(|s| s.elapsed()).unwrap_or_default();
        self.events.lock().unwrap().push((at, event.percent));
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

fn worker_with_step(step: f64) -> SimulatedDownloadWorker {
    SimulatedDownloadWorker::new(&EngineSettings::default()).with_step(Arc::new(move || step))
}

#[tokio::test(start_paused = true)]
async fn ticks_every_interval_and_settles_after_reaching_100() {
    let worker = worker_with_step(30.0);
    let sink = TestSink::new();
    let started = Instant::now();

    let outcome = worker.run(&config(), &sink).await.expect("download ok");

    let events = sink.take();
    let percents: Vec<f64> = events.iter().map(|(_, p)| *p).collect();
    assert_eq!(percents, vec![30.0, 60.0, 90.0, 100.0]);
    for (index, (at, _)) in events.iter().enumerate() {
        assert!(*at >= Duration::from_millis(500 * (index as u64 + 1)));
    }
    // Four ticks plus the settle delay.
    assert!(started.elapsed() >= Duration::from_millis(2500));
    assert!(outcome.saved_path.starts_with("~downloads/video-720p--"));
    assert!(outcome.saved_path.ends_with(".mp4"));
    assert_eq!(outcome.thumbnail_path, None);
}

#[tokio::test(start_paused = true)]
async fn random_progress_is_monotonic_and_capped() {
    let worker = SimulatedDownloadWorker::new(&EngineSettings::default());
    let sink = TestSink::new();

    worker.run(&config(), &sink).await.expect("download ok");

    let percents: Vec<f64> = sink.take().into_iter().map(|(_, p)| p).collect();
    assert!(!percents.is_empty());
    for pair in percents.windows(2) {
        assert!(pair[1] >= pair[0], "{percents:?}");
    }
    assert_eq!(percents.last().copied(), Some(100.0));
    assert!(percents[..percents.len() - 1].iter().all(|p| *p < 100.0));
}

#[tokio::test(start_paused = true)]
async fn audio_with_thumbnail_names_both_files() {
    let worker = worker_with_step(100.0);
    let sink = TestSink::new();
    let config = DownloadConfig {
        quality: "320kbps".to_string(),
        audio_only: true,
        download_thumbnail: true,
        time_range: Some(TimeWindow { start: 10, end: 70 }),
        ..config()
    };

    let outcome = worker.run(&config, &sink).await.expect("download ok");

    let expected = deterministic_filename("audio-320kbps", &config.url, "mp3");
    assert_eq!(outcome.saved_path, format!("~downloads/{expected}"));
    let thumbnail = outcome.thumbnail_path.expect("thumbnail");
    assert!(thumbnail.ends_with(".jpg"));
}

#[tokio::test(start_paused = true)]
async fn inverted_time_range_fails_without_progress() {
    let worker = worker_with_step(10.0);
    let sink = TestSink::new();
    let config = DownloadConfig {
        time_range: Some(TimeWindow { start: 90, end: 30 }),
        ..config()
    };

    let err = worker.run(&config, &sink).await.unwrap_err();
    assert_eq!(err.kind, DownloadFailure::InvalidConfig);
    assert!(sink.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn fetcher_returns_sample_after_delay() {
    let fetcher = SimulatedMetadataFetcher::new(&EngineSettings::default());
    let started = Instant::now();

    let metadata = fetcher.fetch("https://youtu.be/abc123").await.expect("metadata");

    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert_eq!(metadata.title, "Sample YouTube Video - Amazing Content");
    assert_eq!(metadata.duration_seconds, 360);
    assert_eq!(metadata.thumbnail_url, "https://via.placeholder.com/480x360");
}

#[tokio::test(start_paused = true)]
async fn fetcher_rejects_blank_url() {
    let fetcher = SimulatedMetadataFetcher::new(&EngineSettings::default());
    let err = fetcher.fetch("  ").await.unwrap_err();
    assert_eq!(err.kind, FetchFailure::InvalidUrl);
}

#[test]
fn filenames_are_deterministic_and_sanitized() {
    let a = deterministic_filename("Video / 720p: *best*", "https://youtu.be/abc", "mp4");
    let b = deterministic_filename("Video / 720p: *best*", "https://youtu.be/abc", "mp4");
    assert_eq!(a, b);
    assert!(a.starts_with("video-720p-best--"), "{a}");
    assert_eq!(a.len(), "video-720p-best--".len() + 8 + ".mp4".len());

    let other = deterministic_filename("Video / 720p: *best*", "https://youtu.be/xyz", "mp4");
    assert_ne!(a, other);

    assert!(deterministic_filename("???", "u", "jpg").starts_with("download--"));
}

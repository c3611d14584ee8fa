use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use engine_logging::engine_debug;
use rand::Rng;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::filename::deterministic_filename;
use crate::{
    DownloadConfig, DownloadError, DownloadFailure, DownloadOutcome, EngineEvent, EngineSettings,
    Generation, ProgressEvent, RunId,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Tags worker progress with the session tokens and forwards it to the engine
/// event channel.
pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
    generation: Generation,
    run: RunId,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>, generation: Generation, run: RunId) -> Self {
        Self {
            tx,
            generation,
            run,
        }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.tx.send(EngineEvent::DownloadProgress {
            generation: self.generation,
            run: self.run,
            progress: event,
        });
    }
}

/// Executes one download. Progress goes to the sink; the return value is the
/// terminal outcome.
#[async_trait::async_trait]
pub trait DownloadWorker: Send + Sync {
    async fn run(
        &self,
        config: &DownloadConfig,
        sink: &dyn ProgressSink,
    ) -> Result<DownloadOutcome, DownloadError>;
}

/// Source of progress increments, in percent.
pub type StepFn = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Pretends to download: every interval the progress grows by a step from
/// `step`, and completion is reported one settle delay after reaching 100%.
#[derive(Clone)]
pub struct SimulatedDownloadWorker {
    interval: Duration,
    settle_delay: Duration,
    download_dir: String,
    step: StepFn,
}

impl SimulatedDownloadWorker {
    pub fn new(settings: &EngineSettings) -> Self {
        let configured = settings.max_progress_step;
        let max_step = if configured.is_finite() && configured > 0.0 {
            configured
        } else {
            EngineSettings::default().max_progress_step
        };
        Self {
            interval: settings.progress_interval,
            settle_delay: settings.settle_delay,
            download_dir: settings.download_dir.clone(),
            step: Arc::new(move || rand::thread_rng().gen_range(0.0..max_step)),
        }
    }

    /// Replaces the random step source, e.g. with a constant for tests.
    pub fn with_step(mut self, step: StepFn) -> Self {
        self.step = step;
        self
    }

    fn outcome(&self, config: &DownloadConfig) -> DownloadOutcome {
        let (kind, extension) = if config.audio_only {
            ("audio", "mp3")
        } else {
            ("video", "mp4")
        };
        let stem = format!("{kind}-{}", config.quality);
        let saved_path = format!(
            "{}/{}",
            self.download_dir,
            deterministic_filename(&stem, &config.url, extension)
        );
        let thumbnail_path = config.download_thumbnail.then(|| {
            format!(
                "{}/{}",
                self.download_dir,
                deterministic_filename(&stem, &config.url, "jpg")
            )
        });
        DownloadOutcome {
            saved_path,
            thumbnail_path,
        }
    }
}

fn validate(config: &DownloadConfig) -> Result<(), DownloadError> {
    if config.url.trim().is_empty() {
        return Err(DownloadError::new(DownloadFailure::InvalidConfig, "missing url"));
    }
    if config.quality.is_empty() {
        return Err(DownloadError::new(
            DownloadFailure::InvalidConfig,
            "missing quality",
        ));
    }
    if let Some(window) = config.time_range {
        if window.start > window.end {
            return Err(DownloadError::new(
                DownloadFailure::InvalidConfig,
                format!("time range {}..{} is inverted", window.start, window.end),
            ));
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl DownloadWorker for SimulatedDownloadWorker {
    async fn run(
        &self,
        config: &DownloadConfig,
        sink: &dyn ProgressSink,
    ) -> Result<DownloadOutcome, DownloadError> {
        validate(config)?;

        // Like a browser interval: the first tick fires one period after start.
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut progress = 0.0_f64;
        loop {
            ticker.tick().await;
            let step = (self.step)().max(0.0);
            progress += step;
            if progress >= 100.0 {
                sink.emit(ProgressEvent { percent: 100.0 });
                break;
            }
            sink.emit(ProgressEvent { percent: progress });
        }

        tokio::time::sleep(self.settle_delay).await;
        let outcome = self.outcome(config);
        engine_debug!("simulated download saved to {}", outcome.saved_path);
        Ok(outcome)
    }
}

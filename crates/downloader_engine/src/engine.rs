use std::future::Future;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info};
use tokio::runtime::Runtime;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::keywords::fallback_keywords;
use crate::worker::ChannelProgressSink;
use crate::{
    DownloadConfig, DownloadError, DownloadFailure, DownloadWorker, EngineEvent, EngineSettings,
    FetchError, FetchFailure, Generation, KeywordService, MetadataFetcher, RunId,
    SimulatedDownloadWorker, SimulatedKeywordService, SimulatedMetadataFetcher,
};

/// The collaborators the engine drives.
#[derive(Clone)]
pub struct EngineServices {
    pub metadata: Arc<dyn MetadataFetcher>,
    pub worker: Arc<dyn DownloadWorker>,
    pub keywords: Arc<dyn KeywordService>,
}

impl EngineServices {
    pub fn simulated(settings: &EngineSettings) -> Self {
        Self {
            metadata: Arc::new(SimulatedMetadataFetcher::new(settings)),
            worker: Arc::new(SimulatedDownloadWorker::new(settings)),
            keywords: Arc::new(SimulatedKeywordService::new(settings)),
        }
    }
}

enum EngineCommand {
    CancelStale {
        current: Generation,
    },
    FetchMetadata {
        generation: Generation,
        url: String,
    },
    StartDownload {
        generation: Generation,
        run: RunId,
        config: DownloadConfig,
    },
    AnalyzeKeywords {
        generation: Generation,
        title: String,
    },
}

/// Owns the background runtime. Commands go in through the methods, events
/// come back through [`EngineHandle::try_recv`] / [`EngineHandle::recv_timeout`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(services: EngineServices) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut scope = SessionScope::default();
            while let Ok(command) = cmd_rx.recv() {
                dispatch(&runtime, &services, &mut scope, command, &event_tx);
            }
            scope.session.cancel();
            engine_debug!("engine command channel closed");
        });

        Self { cmd_tx, event_rx }
    }

    /// Cancels every task scheduled for a generation older than `current`.
    pub fn cancel_stale(&self, current: Generation) {
        let _ = self.cmd_tx.send(EngineCommand::CancelStale { current });
    }

    pub fn fetch_metadata(&self, generation: Generation, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchMetadata {
            generation,
            url: url.into(),
        });
    }

    /// Starts a download run; any run still in flight is cancelled first.
    pub fn start_download(&self, generation: Generation, run: RunId, config: DownloadConfig) {
        let _ = self.cmd_tx.send(EngineCommand::StartDownload {
            generation,
            run,
            config,
        });
    }

    pub fn analyze_keywords(&self, generation: Generation, title: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::AnalyzeKeywords {
            generation,
            title: title.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Cancellation tokens for the live session and its download run.
struct SessionScope {
    generation: Generation,
    session: CancellationToken,
    download: Option<CancellationToken>,
}

impl Default for SessionScope {
    fn default() -> Self {
        Self {
            generation: 0,
            session: CancellationToken::new(),
            download: None,
        }
    }
}

impl SessionScope {
    /// Moves to `generation`, cancelling everything from older ones.
    /// Returns false when `generation` is itself stale.
    fn enter(&mut self, generation: Generation) -> bool {
        if generation < self.generation {
            return false;
        }
        if generation > self.generation {
            self.session.cancel();
            self.session = CancellationToken::new();
            self.download = None;
            self.generation = generation;
        }
        true
    }

    fn start_run(&mut self) -> CancellationToken {
        if let Some(previous) = self.download.take() {
            previous.cancel();
        }
        let token = self.session.child_token();
        self.download = Some(token.clone());
        token
    }
}

/// Runs `work` as its own task and hands the output to `deliver`. `None`
/// means the work was cancelled and nothing is delivered. A task that panics
/// still delivers, with the value built by `on_failure`.
fn spawn_supervised<T, W, F, D>(runtime: &Runtime, work: W, on_failure: F, deliver: D)
where
    T: Send + 'static,
    W: Future<Output = Option<T>> + Send + 'static,
    F: FnOnce(JoinError) -> T + Send + 'static,
    D: FnOnce(T) + Send + 'static,
{
    let handle = runtime.spawn(work);
    runtime.spawn(async move {
        match handle.await {
            Ok(Some(output)) => deliver(output),
            Ok(None) => {}
            Err(err) => deliver(on_failure(err)),
        }
    });
}

fn dispatch(
    runtime: &Runtime,
    services: &EngineServices,
    scope: &mut SessionScope,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::CancelStale { current } => {
            if scope.enter(current) {
                engine_info!("cancelled tasks older than generation {}", current);
            }
        }
        EngineCommand::FetchMetadata { generation, url } => {
            if !scope.enter(generation) {
                engine_debug!("dropping metadata fetch for stale generation {}", generation);
                return;
            }
            let token = scope.session.child_token();
            let fetcher = services.metadata.clone();
            let event_tx = event_tx.clone();
            spawn_supervised(
                runtime,
                async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            engine_debug!("metadata fetch cancelled for generation {}", generation);
                            None
                        }
                        result = fetcher.fetch(&url) => Some(result),
                    }
                },
                move |err| {
                    engine_error!("metadata task for generation {} failed: {}", generation, err);
                    Err(FetchError::new(FetchFailure::Internal, err.to_string()))
                },
                move |result| {
                    let _ = event_tx.send(EngineEvent::MetadataReady { generation, result });
                },
            );
        }
        EngineCommand::StartDownload {
            generation,
            run,
            config,
        } => {
            if !scope.enter(generation) {
                engine_debug!("dropping download for stale generation {}", generation);
                return;
            }
            let token = scope.start_run();
            let worker = services.worker.clone();
            let sink = ChannelProgressSink::new(event_tx.clone(), generation, run);
            let event_tx = event_tx.clone();
            engine_info!(
                "download generation={} run={} quality={} audio_only={}",
                generation,
                run,
                config.quality,
                config.audio_only
            );
            spawn_supervised(
                runtime,
                async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            engine_debug!("download cancelled generation={} run={}", generation, run);
                            None
                        }
                        result = worker.run(&config, &sink) => Some(result),
                    }
                },
                move |err| {
                    engine_error!("download task generation={} run={} failed: {}", generation, run, err);
                    Err(DownloadError::new(DownloadFailure::Internal, err.to_string()))
                },
                move |result| {
                    let _ = event_tx.send(EngineEvent::DownloadFinished {
                        generation,
                        run,
                        result,
                    });
                },
            );
        }
        EngineCommand::AnalyzeKeywords { generation, title } => {
            if !scope.enter(generation) {
                return;
            }
            let token = scope.session.child_token();
            let service = services.keywords.clone();
            let event_tx = event_tx.clone();
            spawn_supervised(
                runtime,
                async move {
                    tokio::select! {
                        _ = token.cancelled() => None,
                        keywords = service.analyze(&title) => Some(keywords),
                    }
                },
                move |err| {
                    engine_error!("keyword task for generation {} failed: {}", generation, err);
                    fallback_keywords()
                },
                move |keywords| {
                    let _ = event_tx.send(EngineEvent::KeywordsReady { generation, keywords });
                },
            );
        }
    }
}

use downloader_core::{DownloadRequest, Effect, Keyword, Msg, VideoDetails};
use downloader_engine::{
    DownloadConfig, EngineEvent, EngineHandle, EngineServices, EngineSettings, TimeWindow,
};
use engine_logging::{engine_info, engine_warn};

/// Hands effects from `update` to the engine and turns engine events back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            engine: EngineHandle::new(EngineServices::simulated(settings)),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CancelStale { current } => self.engine.cancel_stale(current),
                Effect::FetchMetadata { generation, url } => {
                    engine_info!("FetchMetadata url_len={} url={}", url.len(), url);
                    self.engine.fetch_metadata(generation, url);
                }
                Effect::AnalyzeKeywords { generation, title } => {
                    self.engine.analyze_keywords(generation, title);
                }
                Effect::StartDownload {
                    generation,
                    run,
                    request,
                } => {
                    engine_info!("StartDownload run={} quality={}", run, request.quality);
                    self.engine
                        .start_download(generation, run, map_request(request));
                }
            }
        }
    }

    /// Drains every engine event that is ready.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_request(request: DownloadRequest) -> DownloadConfig {
    DownloadConfig {
        url: request.url,
        quality: request.quality.to_string(),
        audio_only: request.audio_only,
        time_range: request.time_range.map(|range| TimeWindow {
            start: range.start,
            end: range.end,
        }),
        download_thumbnail: request.download_thumbnail,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::MetadataReady { generation, result } => match result {
            Ok(metadata) => Msg::MetadataLoaded {
                generation,
                details: VideoDetails {
                    title: metadata.title,
                    duration_seconds: metadata.duration_seconds,
                    thumbnail_url: metadata.thumbnail_url,
                },
            },
            Err(err) => {
                engine_warn!("metadata fetch failed: {}", err);
                Msg::MetadataFailed {
                    generation,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::DownloadProgress {
            generation,
            run,
            progress,
        } => Msg::DownloadProgress {
            generation,
            run,
            percent: progress.percent,
        },
        EngineEvent::DownloadFinished {
            generation,
            run,
            result,
        } => match result {
            Ok(outcome) => Msg::DownloadCompleted {
                generation,
                run,
                saved_path: outcome.saved_path,
                thumbnail_saved: outcome.thumbnail_path.is_some(),
            },
            Err(err) => {
                engine_warn!("download run {} failed: {}", run, err);
                Msg::DownloadFailed {
                    generation,
                    run,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::KeywordsReady {
            generation,
            keywords,
        } => Msg::KeywordsAnalyzed {
            generation,
            keywords: keywords
                .into_iter()
                .map(|keyword| Keyword::new(keyword.word, keyword.relevance))
                .collect(),
        },
    }
}

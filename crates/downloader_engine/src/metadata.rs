use std::time::Duration;

use engine_logging::engine_debug;

use crate::{EngineSettings, FetchError, FetchFailure, VideoMetadata};

#[async_trait::async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<VideoMetadata, FetchError>;
}

/// Answers every URL with the same sample video after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedMetadataFetcher {
    delay: Duration,
    sample: VideoMetadata,
}

impl SimulatedMetadataFetcher {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            delay: settings.metadata_delay,
            sample: VideoMetadata {
                title: settings.sample_title.clone(),
                duration_seconds: settings.sample_duration_seconds,
                thumbnail_url: settings.sample_thumbnail_url.clone(),
            },
        }
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for SimulatedMetadataFetcher {
    async fn fetch(&self, url: &str) -> Result<VideoMetadata, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::new(FetchFailure::InvalidUrl, "empty url"));
        }
        tokio::time::sleep(self.delay).await;
        engine_debug!("simulated metadata for url_len={}", url.len());
        Ok(self.sample.clone())
    }
}

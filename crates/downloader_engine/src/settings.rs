use std::time::Duration;

/// Timings and canned data used by the simulated collaborators.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub metadata_delay: Duration,
    pub progress_interval: Duration,
    /// Upper bound (exclusive) of one random progress step, in percent.
    /// Values that are not finite and positive fall back to the default.
    pub max_progress_step: f64,
    /// Pause between reaching 100% and reporting completion.
    pub settle_delay: Duration,
    pub keyword_delay: Duration,
    pub sample_title: String,
    pub sample_duration_seconds: u32,
    pub sample_thumbnail_url: String,
    /// Label of the folder simulated downloads are "saved" to.
    pub download_dir: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            metadata_delay: Duration::from_millis(1500),
            progress_interval: Duration::from_millis(500),
            max_progress_step: 15.0,
            settle_delay: Duration::from_millis(500),
            keyword_delay: Duration::from_millis(1500),
            sample_title: "Sample YouTube Video - Amazing Content".to_string(),
            sample_duration_seconds: 360,
            sample_thumbnail_url: "https://via.placeholder.com/480x360".to_string(),
            download_dir: "~downloads".to_string(),
        }
    }
}

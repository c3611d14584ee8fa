use std::path::PathBuf;
use std::time::Duration;

use downloader_engine::EngineSettings;
use engine_logging::LogDestination;
use log::LevelFilter;

/// Start-up configuration for the terminal front-end.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Logs go to a file by default so they do not interleave with frames.
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    /// How long the loop waits for input before polling engine events.
    pub poll_interval: Duration,
    pub engine: EngineSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_destination: LogDestination::File(PathBuf::from("./downloader.log")),
            log_level: LevelFilter::Info,
            poll_interval: Duration::from_millis(50),
            engine: EngineSettings::default(),
        }
    }
}

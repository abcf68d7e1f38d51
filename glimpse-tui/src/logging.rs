use log::LevelFilter;
use simplelog::*;
use std::fs::File;
use std::path::PathBuf;

/// Logging configuration. The terminal is owned by the UI, so everything goes
/// to a file.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Master switch to enable/disable all logging
    pub enabled: bool,
    pub log_file: PathBuf,
    pub clear_on_startup: bool,
    pub features: LogFeatures,
    pub level: LevelFilter,
}

/// Feature flags for specific logging categories
#[derive(Debug, Clone)]
pub struct LogFeatures {
    /// View activation, stale results, commits
    pub view_state: bool,
    pub key_events: bool,
    pub api_calls: bool,
    pub general: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from("glimpse.log"),
            clear_on_startup: true,
            features: LogFeatures::default(),
            level: LevelFilter::Info,
        }
    }
}

impl Default for LogFeatures {
    fn default() -> Self {
        Self {
            view_state: true,
            key_events: false,
            api_calls: true,
            general: true,
        }
    }
}

impl LogConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Only errors and warnings
    pub fn minimal() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Warn,
            features: LogFeatures {
                view_state: false,
                key_events: false,
                api_calls: false,
                general: false,
            },
            ..Default::default()
        }
    }

    /// Every category at trace level
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Trace,
            features: LogFeatures {
                view_state: true,
                key_events: true,
                api_calls: true,
                general: true,
            },
            ..Default::default()
        }
    }

    pub fn with_file(mut self, log_file: PathBuf) -> Self {
        self.log_file = log_file;
        self
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        let _ = WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink());
        return Ok(());
    }

    if config.clear_on_startup {
        let _ = File::create(&config.log_file)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let mut builder = ConfigBuilder::new();
    builder.set_time_format_rfc3339();
    let _ = builder.set_time_offset_to_local();
    // Category targets are switched on and off through the macros below
    if !config.features.api_calls {
        builder.add_filter_ignore_str("api_calls");
    }
    let log_config = builder.build();

    WriteLogger::init(config.level, log_config, log_file)?;

    log::info!("Logging initialized: file={}, level={:?}", config.log_file.display(), config.level);
    log::debug!("Log features: {:?}", config.features);

    Ok(())
}

/// Log view lifecycle events (activation, stale results, commits)
#[macro_export]
macro_rules! log_view_state {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.view_state {
            log::debug!(target: "view_state", $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_key_event {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.key_events {
            log::debug!(target: "key_events", $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_api_call {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.api_calls {
            log::debug!(target: "api_calls", $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.general {
            log::debug!(target: "general", $($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(!LogConfig::disabled().enabled);
        assert_eq!(LogConfig::minimal().level, LevelFilter::Warn);
        assert!(!LogConfig::minimal().features.api_calls);
        assert!(LogConfig::verbose().features.key_events);
        assert_eq!(
            LogConfig::default().with_file(PathBuf::from("x.log")).log_file,
            PathBuf::from("x.log")
        );
    }
}

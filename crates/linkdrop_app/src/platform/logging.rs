//! Trace output for the desktop app: terminal, `./linkdrop.log`, or both.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "linkdrop.log";
const LEVEL: LevelFilter = LevelFilter::Info;

/// Where trace output goes, as named in `linkdrop.ron`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    File,
    Terminal,
    #[default]
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Installs the global logger. A log file that cannot be created is
/// reported on stderr and skipped.
pub fn initialize(destination: LogDestination) {
    let config = logger_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            LEVEL,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(Path::new(LOG_FILENAME)) {
            Ok(file) => loggers.push(WriteLogger::new(LEVEL, config, file)),
            Err(err) => eprintln!("Warning: could not create {LOG_FILENAME}: {err}"),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn logger_config() -> Config {
    // eframe and its windowing stack are chatty at info level.
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("eframe")
        .add_filter_ignore_str("egui")
        .add_filter_ignore_str("winit")
        .add_filter_ignore_str("wgpu")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_select_sinks() {
        assert!(LogDestination::Both.to_terminal() && LogDestination::Both.to_file());
        assert!(LogDestination::Terminal.to_terminal() && !LogDestination::Terminal.to_file());
        assert!(!LogDestination::File.to_terminal() && LogDestination::File.to_file());
        assert_eq!(LogDestination::default(), LogDestination::Both);
    }
}

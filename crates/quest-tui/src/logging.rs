//! Tracing subscriber setup for the `quest-status` binary.
//!
//! Library code only emits `tracing` events; nothing is recorded until the
//! binary installs a subscriber here.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quest_core::config::LoggingConfig;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
    /// The terminal belongs to the UI and no file is configured.
    Discard,
}

#[must_use]
pub fn log_sink(config: &LoggingConfig, interactive: bool) -> LogSink {
    let file = config.file.trim();
    if !file.is_empty() {
        return LogSink::File(PathBuf::from(file));
    }
    if interactive {
        LogSink::Discard
    } else {
        LogSink::Stderr
    }
}

/// `RUST_LOG` when set, the configured level otherwise.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.trim()))
}

pub fn init_logging(config: &LoggingConfig, interactive: bool) -> Result<(), String> {
    let json = config.format.trim().eq_ignore_ascii_case("json");
    match log_sink(config, interactive) {
        LogSink::Discard => Ok(()),
        LogSink::Stderr => install(std::io::stderr, json, true, env_filter(config)),
        LogSink::File(path) => {
            let file = open_log_file(&path)?;
            install(Mutex::new(file), json, false, env_filter(config))
        }
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File, String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("create log directory {}: {err}", parent.display()))?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| format!("open log file {}: {err}", path.display()))
}

fn install<W>(writer: W, json: bool, ansi: bool, filter: EnvFilter) -> Result<(), String>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(writer);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| format!("install tracing subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{log_sink, open_log_file, LogSink};
    use quest_core::config::LoggingConfig;
    use std::path::PathBuf;

    #[test]
    fn interactive_without_file_discards() {
        let config = LoggingConfig::default();
        assert_eq!(log_sink(&config, true), LogSink::Discard);
        assert_eq!(log_sink(&config, false), LogSink::Stderr);
    }

    #[test]
    fn configured_file_wins() {
        let config = LoggingConfig {
            file: " /tmp/quest.log ".to_owned(),
            ..LoggingConfig::default()
        };
        assert_eq!(
            log_sink(&config, true),
            LogSink::File(PathBuf::from("/tmp/quest.log"))
        );
    }

    #[test]
    fn log_file_parent_directories_are_created() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(err) => panic!("tempdir: {err}"),
        };
        let path = dir.path().join("nested/logs/quest.log");
        if let Err(err) = open_log_file(&path) {
            panic!("open log file: {err}");
        }
        assert!(path.exists());
    }
}

//! Configuration for the quest status tools.
//!
//! Root configuration struct and nested sections with full defaults,
//! validation, optional YAML file loading, environment variable overrides,
//! and tilde path expansion.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, RegistryError};
use crate::registry::{builtin_registry, RegistryOverrides, StatusRegistry};
use crate::status::Status;

/// File name looked up in each config search directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default width (in terminal columns) at which condensed badges grow.
pub const DEFAULT_LG_BREAKPOINT: u16 = 120;

// ---------------------------------------------------------------------------
// Root config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: LoggingConfig,
    pub tui: TuiConfig,
    /// Per-status descriptor overrides keyed by slug.
    pub statuses: RegistryOverrides,
    /// Environment overrides skipped while loading. Loading runs before any
    /// log subscriber exists, so callers report these with
    /// [`Config::warn_ignored_env`] once logging is up.
    #[serde(skip)]
    pub ignored_env: Vec<IgnoredEnvVar>,
}

/// A `QUEST_*` variable whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredEnvVar {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

impl Config {
    /// Loads configuration from `explicit`, or the first file found on the
    /// search path, then applies environment overrides and validates.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(),
        };
        let mut cfg = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        cfg.apply_env_overrides();
        cfg.expand_paths();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses one YAML file without applying overrides or validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text, path)
    }

    /// Parses YAML text; `origin` is only used for error messages.
    pub fn from_yaml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|err| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Applies `QUEST_*` environment overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies `QUEST_*` overrides using `lookup` as the environment source.
    ///
    /// Unparseable numeric or boolean values are skipped and recorded in
    /// [`Config::ignored_env`].
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QUEST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("QUEST_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(file) = lookup("QUEST_LOG_FILE") {
            self.logging.file = file;
        }
        if let Some(theme) = lookup("QUEST_TUI_THEME") {
            self.tui.theme = theme;
        }
        if let Some(raw) = lookup("QUEST_TUI_LG_BREAKPOINT") {
            match raw.trim().parse::<u16>() {
                Ok(value) => self.tui.lg_breakpoint = value,
                Err(err) => self.ignored_env.push(IgnoredEnvVar {
                    name: "QUEST_TUI_LG_BREAKPOINT",
                    value: raw,
                    reason: err.to_string(),
                }),
            }
        }
        if let Some(raw) = lookup("QUEST_IS_CORE") {
            match parse_bool(&raw) {
                Some(value) => self.tui.is_core = value,
                None => self.ignored_env.push(IgnoredEnvVar {
                    name: "QUEST_IS_CORE",
                    value: raw,
                    reason: "expected true/false, yes/no, on/off or 1/0".into(),
                }),
            }
        }
    }

    /// Logs one warning per skipped environment override.
    pub fn warn_ignored_env(&self) {
        for ignored in &self.ignored_env {
            tracing::warn!(
                variable = ignored.name,
                value = %ignored.value,
                reason = %ignored.reason,
                "ignoring environment override"
            );
        }
    }

    /// Validates the entire configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Logging
        match self.logging.level.to_lowercase().trim() {
            "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "logging.level must be one of debug, info, warn, error".into(),
                ))
            }
        }
        match self.logging.format.to_lowercase().trim() {
            "console" | "json" => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "logging.format must be one of console, json".into(),
                ))
            }
        }

        // TUI
        match self.tui.theme.to_lowercase().trim() {
            "dark" | "light" | "high-contrast" => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "tui.theme must be one of dark, light, high-contrast".into(),
                ))
            }
        }
        if self.tui.lg_breakpoint == 0 {
            return Err(ConfigError::Invalid(
                "tui.lg_breakpoint must be greater than zero".into(),
            ));
        }

        // Status overrides must resolve against the builtin registry.
        self.registry()
            .map_err(|err| ConfigError::Invalid(format!("statuses: {err}")))?;

        Ok(())
    }

    /// Builtin registry with configured overrides applied.
    pub fn registry(&self) -> Result<StatusRegistry<Status>, RegistryError> {
        if self.statuses.is_empty() {
            return Ok(builtin_registry().clone());
        }
        builtin_registry().with_overrides(&self.statuses)
    }

    /// Expands `~` to the home directory in path-valued fields.
    pub fn expand_paths(&mut self) {
        self.logging.file = expand_tilde(&self.logging.file);
    }
}

// ---------------------------------------------------------------------------
// Section configs
// ---------------------------------------------------------------------------

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Log file path; empty means stderr.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "console".into(),
            file: String::new(),
        }
    }
}

/// TUI presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuiConfig {
    pub theme: String,
    /// Terminal width at which condensed badges switch to the large glyph.
    pub lg_breakpoint: u16,
    /// Render the overview badge strip condensed.
    pub condensed: bool,
    /// Treat the demo quest as a core quest (shows core-only statuses).
    pub is_core: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".into(),
            lg_breakpoint: DEFAULT_LG_BREAKPOINT,
            condensed: true,
            is_core: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if path.is_empty() {
        return path.to_string();
    }
    if path == "~" {
        return home_dir().display().to_string();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return home_dir().join(rest).display().to_string();
    }
    path.to_string()
}

/// Search for a configuration file in the standard locations.
/// Returns `None` if no config file is found.
pub fn find_config_file() -> Option<PathBuf> {
    config_search_paths()
        .into_iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Returns the list of directories to search for config files.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        paths.push(Path::new(&xdg).join("quest-status"));
    }

    let home = home_dir();
    if home.as_os_str() != "" {
        paths.push(home.join(".config/quest-status"));
    }

    paths.push(PathBuf::from("."));

    paths
}

/// Get the user's home directory, falling back to `/` on failure.
fn home_dir() -> PathBuf {
    #[allow(deprecated)]
    std::env::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

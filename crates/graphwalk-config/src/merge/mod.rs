//! Graph file loading and settings layering

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use graphwalk_core::error::GraphError;

use crate::labels::ResolvedGraph;
use crate::ConfigResult;

/// Log levels accepted in settings
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main graph and settings loading interface
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Base for relative graph paths
    cwd: Utf8PathBuf,
}

/// Where a loaded value came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Built-in default
    Default,
    /// Global config file
    Global(Utf8PathBuf),
    /// TOML graph file
    GraphToml(Utf8PathBuf),
    /// JSON graph file
    GraphJson(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// When to colour text output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// CLI settings after layering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default tracing level
    pub log_level: String,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

/// Settings layering: defaults < global file < environment < CLI flags
#[derive(Debug, Clone, Default)]
pub struct SettingsLayering {
    global: Option<(Settings, Utf8PathBuf)>,
    env_overrides: HashMap<String, String>,
    cli_overrides: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: OutputFormat::Text,
            color: ColorChoice::Auto,
        }
    }
}

impl Settings {
    fn validate(&self) -> ConfigResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(GraphError::config(
                "log_level",
                format!(
                    "Unknown log level '{}'; expected one of {}",
                    self.log_level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

impl FromStr for OutputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(GraphError::config(
                "format",
                format!("Unknown output format '{}'; expected text or json", other),
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ColorChoice {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(GraphError::config(
                "color",
                format!("Unknown color choice '{}'; expected auto, always or never", other),
            )),
        }
    }
}

impl ConfigLoader {
    /// Create a new loader rooted at `cwd`
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Absolute path for a user-supplied graph path
    pub fn resolve_path(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Load a graph file, choosing the parser by extension, and resolve labels
    pub async fn load_graph(&self, path: &Utf8Path) -> ConfigResult<(ResolvedGraph, ConfigSource)> {
        let path = self.resolve_path(path);

        let (file, source) = match path.extension() {
            Some("toml") => (
                crate::toml::load_from_file(&path).await?,
                ConfigSource::GraphToml(path.clone()),
            ),
            Some("json") => (
                crate::json::load_from_file(&path).await?,
                ConfigSource::GraphJson(path.clone()),
            ),
            _ => {
                return Err(GraphError::config(
                    "file",
                    format!("Cannot tell the format of {}; use a .toml or .json extension", path),
                ))
            },
        };

        let graph = file.resolve()?;
        debug!("Loaded graph from {:?}", source);

        Ok((graph, source))
    }

    /// Location of the global settings file
    pub fn global_config_path(&self) -> ConfigResult<Utf8PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            GraphError::config("home_dir", "Could not determine home directory")
        })?;

        Ok(Utf8PathBuf::try_from(home_dir)
            .map_err(|e| GraphError::config("home_dir", format!("Invalid home directory path: {}", e)))?
            .join(".graphwalk")
            .join("config.toml"))
    }

    /// Load global settings, if the file exists
    pub async fn load_global_settings(&self) -> ConfigResult<Option<(Settings, Utf8PathBuf)>> {
        let path = self.global_config_path()?;

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            let settings = load_settings_file(&path).await?;
            Ok(Some((settings, path)))
        } else {
            Ok(None)
        }
    }
}

/// Parse a settings TOML document
pub fn parse_settings_toml(content: &str) -> ConfigResult<Settings> {
    let settings: Settings = ::toml::from_str(content).map_err(|e| GraphError::TomlParse {
        message: e.message().to_string(),
        line: 0,
        column: 0,
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Read and parse a settings file
pub async fn load_settings_file(path: &Utf8Path) -> ConfigResult<Settings> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GraphError::io(format!("Failed to read {}", path), e))?;

    parse_settings_toml(&content)
}

impl SettingsLayering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global file layer
    pub fn with_global(mut self, global: Option<(Settings, Utf8PathBuf)>) -> Self {
        self.global = global;
        self
    }

    /// Environment layer (`GRAPHWALK_LOG`, `GRAPHWALK_FORMAT`, `NO_COLOR`)
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env_overrides = env;
        self
    }

    /// CLI layer, keyed by setting name (`log_level`, `format`, `color`)
    pub fn with_cli(mut self, key: &str, value: impl Into<String>) -> Self {
        self.cli_overrides.insert(key.to_string(), value.into());
        self
    }

    /// Merge every layer; returns the settings and where each field came from
    pub fn merge(&self) -> ConfigResult<(Settings, Vec<(&'static str, ConfigSource)>)> {
        let mut settings = Settings::default();
        let mut sources = vec![
            ("log_level", ConfigSource::Default),
            ("format", ConfigSource::Default),
            ("color", ConfigSource::Default),
        ];

        if let Some((global, path)) = &self.global {
            settings = global.clone();
            for (_, source) in sources.iter_mut() {
                *source = ConfigSource::Global(path.clone());
            }
        }

        for (key, value) in &self.env_overrides {
            let field = match key.as_str() {
                "GRAPHWALK_LOG" => {
                    settings.log_level = value.to_ascii_lowercase();
                    0
                },
                "GRAPHWALK_FORMAT" => {
                    settings.format = value.parse()?;
                    1
                },
                // Any non-empty value disables colour
                "NO_COLOR" if !value.is_empty() => {
                    settings.color = ColorChoice::Never;
                    2
                },
                _ => continue,
            };
            sources[field].1 = ConfigSource::Environment(key.clone());
        }

        for (key, value) in &self.cli_overrides {
            let field = match key.as_str() {
                "log_level" => {
                    settings.log_level = value.to_ascii_lowercase();
                    0
                },
                "format" => {
                    settings.format = value.parse()?;
                    1
                },
                "color" => {
                    settings.color = value.parse()?;
                    2
                },
                _ => continue,
            };
            sources[field].1 = ConfigSource::CommandLine;
        }

        settings.validate()?;

        Ok((settings, sources))
    }

    /// Collect relevant environment variables from the process
    pub fn env_from_process() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("GRAPHWALK_") || key == "NO_COLOR")
            .collect()
    }
}

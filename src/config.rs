use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Deployment environment. Selects which database the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Environment {
    #[default]
    Production,
    Development,
    Test,
}

impl Environment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" => Some(Environment::Production),
            "development" => Some(Environment::Development),
            "test" => Some(Environment::Test),
            _ => None,
        }
    }

    /// Name of the database used in this environment.
    pub fn database_name(&self) -> &'static str {
        match self {
            Environment::Production => "mealplanner",
            Environment::Development | Environment::Test => "mealplanner-test",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        Environment::parse(&s).unwrap_or_else(|| {
            tracing::warn!("Unknown environment '{}', defaulting to production", s);
            Environment::Production
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Environment::Production => "production",
            Environment::Development => "development",
            Environment::Test => "test",
        };
        write!(f, "{}", s)
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Directory holding the database files
    pub data_dir: PathBuf,
    /// Explicit database file, overriding the per-environment default
    pub database_path: Option<PathBuf>,
    /// Directory served under `/public`
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            port: 8080,
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mealplanner"),
            database_path: None,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var("MEALPLANNER_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(Self::default_config_path);
        let mut config = Self::from_file(&path)?;

        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Defaults overlaid with the YAML file at `path`, if it exists.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Apply `MEALPLANNER_*` overrides, reading values through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("MEALPLANNER_ENV") {
            self.environment = Environment::from(env);
        }
        if let Some(port) = lookup("MEALPLANNER_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(dir) = lookup("MEALPLANNER_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("MEALPLANNER_DATABASE_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup("MEALPLANNER_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Database file in use: the explicit path, or one named after the environment.
    pub fn database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(|| {
            self.data_dir
                .join(format!("{}.db", self.environment.database_name()))
        })
    }

    /// Default config file path: ~/.config/mealplanner/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mealplanner")
            .join("config.yaml")
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {err}", path = .0.display(), err = .1)]
    ReadError(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{path}': {err}", path = .0.display(), err = .1)]
    ParseError(PathBuf, #[source] serde_yaml::Error),

    #[error("Invalid port: {0:?}")]
    InvalidPort(String),
}

/// Server configuration
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables that override values from the config file.
pub const ENV_PORT: &str = "PORT";
pub const ENV_COURSES_DIR: &str = "COURSES_DIR";
pub const ENV_FILE_TIMEOUT_MS: &str = "COURSE_FILE_TIMEOUT_MS";

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_address")]
    pub address: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding one JSON file per course subject
    #[serde(default = "default_courses_dir")]
    pub courses_dir: PathBuf,
    /// Upper bound for reading a single course file, in milliseconds
    #[serde(default = "default_file_timeout_ms")]
    pub file_timeout_ms: u64,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_courses_dir() -> PathBuf {
    PathBuf::from("courses")
}

fn default_file_timeout_ms() -> u64 {
    5000
}

impl ServerConfig {
    /// Loads the configuration from an optional JSON file, then applies
    /// environment overrides.
    ///
    /// # Arguments
    /// * `path` - Path to a JSON config file; defaults are used when `None`
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` - Loaded and validated configuration
    /// * `Err` - If the file can't be read or parsed, or a value is invalid
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| format!("Invalid {ENV_PORT} {port:?}: {e}"))?;
        }

        if let Some(dir) = lookup(ENV_COURSES_DIR) {
            self.courses_dir = PathBuf::from(dir);
        }

        if let Some(ms) = lookup(ENV_FILE_TIMEOUT_MS) {
            self.file_timeout_ms = ms
                .trim()
                .parse()
                .map_err(|e| format!("Invalid {ENV_FILE_TIMEOUT_MS} {ms:?}: {e}"))?;
        }

        Ok(())
    }

    /// Validates configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.file_timeout_ms == 0 {
            return Err("Course file timeout must be greater than 0".to_string());
        }
        Ok(())
    }

    /// The `address:port` pair to bind to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn file_timeout(&self) -> Duration {
        Duration::from_millis(self.file_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            courses_dir: default_courses_dir(),
            file_timeout_ms: default_file_timeout_ms(),
        }
    }
}

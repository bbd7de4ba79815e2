// Server configuration, read from the environment at startup

use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CURRICULUM_PATH: &str = "config/curriculum.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub curriculum_path: PathBuf,
    /// Run the graph exercise check before comparing outputs
    pub graph_checks: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Read `BIND_ADDR`, `CURRICULUM_PATH`, `GRAPH_CHECKS` and `LOG_FORMAT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let curriculum_path = lookup("CURRICULUM_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CURRICULUM_PATH));

        // Anything but an explicit "false"/"0" keeps the check on
        let graph_checks = lookup("GRAPH_CHECKS")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0"))
            .unwrap_or(true);

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            bind_addr,
            curriculum_path,
            graph_checks,
            log_format,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

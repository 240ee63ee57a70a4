use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::paths::resolve_home_dir;

/// Main application configuration with strongly-typed global sections
/// and a flexible per-module configuration bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Directory containing per-module YAML files (optional).
    #[serde(default)]
    pub modules_dir: Option<String>,
    /// Per-module configuration bag: module_name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub home_dir: String, // will be normalized to absolute path
    pub host: String,
    pub port: u16,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    pub file: String,          // "logs/profile-server.log"
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>, // How many rotated files to keep
    #[serde(default)]
    pub max_size_mb: Option<u64>, // Max size of the file in MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Empty => use platform default resolved by resolve_home_dir():
            // Windows: %APPDATA%/.profile-server
            // Unix/macOS: $HOME/.profile-server
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/profile-server.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: Some(default_logging_config()),
            modules_dir: None,
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        // For layered loading, start from a minimal base where optional sections are None,
        // so they remain None unless explicitly provided by YAML/ENV.
        let base = AppConfig {
            server: ServerConfig::default(),
            logging: None,
            modules_dir: None,
            modules: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            // Example: APP__SERVER__PORT=8000 maps to server.port
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())?;

        // Normalize + create home_dir immediately.
        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        // Merge module files if modules_dir is specified.
        if let Some(dir) = config.modules_dir.clone() {
            merge_module_files(&mut config.modules, dir)?;
        }

        Ok(config)
    }

    /// Load configuration from file or create with default values.
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                normalize_home_dir_inplace(&mut c.server)
                    .context("Failed to resolve server.home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        // Set logging level based on verbose flags for "default" section.
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            default_section.console_level = match args.verbose {
                0 => default_section.console_level.clone(), // keep
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
        }
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

const fn default_subdir() -> &'static str {
    ".profile-server"
}

/// Normalize `server.home_dir` using `paths::resolve_home_dir` and store the absolute path back.
fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    // Treat empty string as "not provided" => None.
    let opt = if server.home_dir.trim().is_empty() {
        None
    } else {
        Some(server.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(opt, default_subdir(), /*create*/ true)
        .context("home_dir normalization failed")?;

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

fn merge_module_files(
    bag: &mut HashMap<String, serde_json::Value>,
    dir: impl AsRef<Path>,
) -> Result<()> {
    use std::fs;
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if ext != "yml" && ext != "yaml" {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        let raw = fs::read_to_string(&path)?;
        let val: serde_yaml::Value = serde_yaml::from_str(&raw)?;
        let json = serde_json::to_value(val)?;
        bag.insert(name, json);
    }
    Ok(())
}

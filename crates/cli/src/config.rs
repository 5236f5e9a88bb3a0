//! Configuration loading
//!
//! Configuration lives in a TOML file, `sheetwatch.toml` in the working
//! directory unless `--config` points elsewhere. Every table is optional;
//! missing values fall back to the built-in defaults below.
//!
//! ```toml
//! [watch]
//! enabled = true
//! files = ["proyectos.xlsx", "radicados.xlsx"]
//! cooldown_ms = 2000
//!
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! # site_dir = "site"
//!
//! [generate]
//! program = "python"
//! args = ["generar_html.py"]
//! # timeout_secs = 600
//!
//! [initialize]
//! program = "python"
//! args = ["inicializar_proyecto.py"]
//! ```

use anyhow::{Context, Result};
use runner::ScriptCommand;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "sheetwatch.toml";

/// Upper bound for the debounce window (1 hour)
pub const MAX_COOLDOWN_MS: u64 = 3_600_000;

/// Upper bound for a script timeout (24 hours)
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub watch: WatchConfig,
    pub server: ServerConfig,
    pub generate: ScriptConfig,
    pub initialize: ScriptConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch: WatchConfig::default(),
            server: ServerConfig::default(),
            generate: ScriptConfig::new("python", ["generar_html.py"]),
            initialize: ScriptConfig::new("python", ["inicializar_proyecto.py"]),
        }
    }
}

/// `[watch]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Start the file watcher alongside the server
    pub enabled: bool,
    /// Spreadsheets whose modification triggers regeneration
    pub files: Vec<PathBuf>,
    /// Minimum gap between two accepted changes
    pub cooldown_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            files: vec![
                PathBuf::from("proyectos.xlsx"),
                PathBuf::from("radicados.xlsx"),
            ],
            cooldown_ms: 2000,
        }
    }
}

impl WatchConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// `[server]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of generated pages served for any other path (default: none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            site_dir: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[generate]` / `[initialize]` tables
///
/// `program` is required when the table is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Directory to run in (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    /// Kill the script after this many seconds (default: wait forever)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ScriptConfig {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build the command this table describes
    pub fn to_command(&self) -> ScriptCommand {
        let cmd = ScriptCommand::new(&self.program)
            .args(self.args.iter().cloned())
            .timeout(self.timeout());

        match &self.working_dir {
            Some(dir) => cmd.working_dir(dir),
            None => cmd,
        }
    }

    fn validate(&self, table: &str) -> Result<()> {
        if self.program.trim().is_empty() {
            anyhow::bail!("{}.program must not be empty", table);
        }

        if let Some(secs) = self.timeout_secs {
            if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
                anyhow::bail!(
                    "{}.timeout_secs must be between 1 and {} (got {})",
                    table,
                    MAX_TIMEOUT_SECS,
                    secs
                );
            }
        }

        Ok(())
    }
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise return the defaults
    pub fn load_or_default(path: &Path) -> Result<(Self, Option<PathBuf>)> {
        if path.exists() {
            Ok((Self::load(path)?, Some(path.to_path_buf())))
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok((Self::default(), None))
        }
    }

    /// Resolve the CLI's `--config` flag
    ///
    /// An explicit path must exist. Without one, `sheetwatch.toml` is used if
    /// present. Returns the config and the file it came from, if any.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        match explicit {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None => Self::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Check every value against its valid range
    pub fn validate(&self) -> Result<()> {
        if self.watch.files.is_empty() {
            anyhow::bail!("watch.files must list at least one file");
        }

        if self.watch.cooldown_ms > MAX_COOLDOWN_MS {
            anyhow::bail!(
                "watch.cooldown_ms must be between 0 and {} (got {})",
                MAX_COOLDOWN_MS,
                self.watch.cooldown_ms
            );
        }

        if self.server.host.trim().is_empty() {
            anyhow::bail!("server.host must not be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("server.port must be between 1 and 65535");
        }

        if matches!(&self.server.site_dir, Some(dir) if dir.as_os_str().is_empty()) {
            anyhow::bail!("server.site_dir must not be empty");
        }

        self.generate.validate("generate")?;
        self.initialize.validate("initialize")?;

        Ok(())
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File read when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "microserve.yaml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Prefix applied to every static lookup, normalized at startup
    pub static_root: String,
    /// Directory enumerated into the static asset namespace
    pub assets_dir: PathBuf,
    /// Users registered before the first request
    pub seed_users: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 35000,
            static_root: String::new(),
            assets_dir: PathBuf::from("public"),
            seed_users: vec!["Andres".into(), "Maria".into(), "Carlos".into()],
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, falling back to defaults. `PORT` overrides the port.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Ok(port) = std::env::var("PORT") {
            cfg.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT value: {port:?}"))?;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

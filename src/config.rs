use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Server configuration, loaded from an optional YAML file.
///
/// Every field has a compiled-in default, so the server starts with no
/// configuration file at all. The file path comes from the `ALCOVE_CONFIG`
/// environment variable (default `alcove.yaml`), and `LISTEN` overrides
/// the listen address regardless of what the file says.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub listen_addr: String,
    /// Value of the `Server` response header.
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Root directory served resources are resolved under.
    pub content_root: PathBuf,
    /// Directory holding the fixed 400/404 error pages.
    pub error_root: PathBuf,
    /// Default document served for `/`.
    pub index_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            name: "alcove".to_string(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
            error_root: PathBuf::from("errors"),
            index_file: "index.html".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("ALCOVE_CONFIG").unwrap_or_else(|_| "alcove.yaml".to_string());

        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_yaml(&text)
                .with_context(|| format!("invalid configuration in {}", path))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path));
            }
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Checks the filesystem contract the server depends on: the content
    /// root must be a directory and both fixed error pages must exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        let s = &self.static_files;

        if !s.content_root.is_dir() {
            anyhow::bail!("content root {} is not a directory", s.content_root.display());
        }

        for page in ["400.html", "404.html"] {
            let path = s.error_root.join(page);
            if !path.is_file() {
                anyhow::bail!("missing error page {}", path.display());
            }
        }

        Ok(())
    }
}

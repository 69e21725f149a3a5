use std::{env, path::PathBuf};

use anyhow::{Context, Result};

/// Default threshold above which article content is replaced by a stub.
pub const DEFAULT_CONTENT_MAX_SIZE_KB: u64 = 500;

/// Server settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Base directory that article `content` paths are relative to.
    pub site_root: PathBuf,
    /// Directory holding the JSON index files.
    pub data_dir: PathBuf,
    /// URL prefix for static assets.
    pub static_prefix: String,
    /// Directory served under `static_prefix`.
    pub static_dir: PathBuf,
    pub content_max_size_kb: u64,
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        // Development: 0.0.0.0 for direct access
        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("invalid PORT: {raw}"))?,
            None => 3000,
        };
        let site_root = PathBuf::from(var("SITE_ROOT").unwrap_or_else(|| ".".to_string()));
        let data_dir = var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| site_root.join("data"));
        let static_prefix = normalize_prefix(
            &var("STATIC_PREFIX").unwrap_or_else(|| "/content".to_string()),
        );
        let static_dir = var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| site_root.join("content"));
        let content_max_size_kb = match var("CONTENT_MAX_SIZE_KB") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid CONTENT_MAX_SIZE_KB: {raw}"))?,
            None => DEFAULT_CONTENT_MAX_SIZE_KB,
        };
        let log_dir = var("LOG_DIR").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            port,
            site_root,
            data_dir,
            static_prefix,
            static_dir,
            content_max_size_kb,
            log_dir,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    format!("/{trimmed}")
}

use std::{
    net::{IpAddr, Ipv4Addr},
    ops::{Deref, DerefMut},
    path::PathBuf,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// Application configuration, loaded by `veranda_kernel::config::load_config`
/// from `server.toml` and `VERANDA__*` environment variables.
///
/// The inner record sits behind an [`Arc`] so cloning the config into
/// request state stays cheap. Mutation goes through [`DerefMut`], which
/// unshares the inner record first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    inner: Arc<AppConfigInner>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfigInner {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        Arc::make_mut(&mut self.inner)
    }
}

/// Bind address and optional TLS material for the HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 4180,
            ssl: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Location of the site document and of uploaded media.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the site document.
    pub data_dir: PathBuf,
    /// File name of the site document inside `data_dir`.
    pub document: String,
    /// Compress the document on disk with LZ4.
    pub compress: bool,
    /// Directory uploaded images are written to and served from.
    pub uploads_dir: PathBuf,
    /// Upper bound on a single uploaded file, in bytes.
    pub upload_limit_bytes: usize,
}

impl StorageConfig {
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(&self.document)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            document: "site.json".to_string(),
            compress: false,
            uploads_dir: PathBuf::from("uploads"),
            upload_limit_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. `info` or `veranda_server=debug`.
    pub level: String,
    /// When set, logs additionally roll into daily files under this directory.
    pub path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
        }
    }
}

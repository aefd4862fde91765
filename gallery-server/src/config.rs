use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use gallery_auth::{PAYING_USER_ROLE, ROLE_CLAIM, SUBJECT_CLAIM};
use gallery_core::DEFAULT_MAX_UPLOAD_BYTES;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub uploads: UploadConfig,
}

/// Where image content is written
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String, // "memory", "local"
    pub local_path: Option<String>,
}

/// Where image records are kept
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_backend")]
    pub backend: String, // "memory", "sqlite"
    pub sqlite_path: Option<String>,
}

/// Which claims carry the subject and the creation entitlement
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_subject_claim")]
    pub subject_claim: String,
    #[serde(default = "default_role_claim")]
    pub role_claim: String,
    #[serde(default = "default_creator_role")]
    pub creator_role: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            local_path: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sqlite_path: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            subject_claim: default_subject_claim(),
            role_claim: default_role_claim(),
            creator_role: default_creator_role(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage: StorageConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            uploads: UploadConfig::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    7230
}
fn default_backend() -> String {
    "memory".into()
}
fn default_subject_claim() -> String {
    SUBJECT_CLAIM.into()
}
fn default_role_claim() -> String {
    ROLE_CLAIM.into()
}
fn default_creator_role() -> String {
    PAYING_USER_ROLE.into()
}
fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Config {
    /// `gallery-server.toml`, overridden by `GALLERY_*` variables
    /// (`__` separates nested keys, e.g. `GALLERY_AUTH__CREATOR_ROLE`)
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("gallery-server.toml"))
            .merge(Env::prefixed("GALLERY_").split("__"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config: Config = Self::figment().extract()?;
        Ok(config)
    }
}

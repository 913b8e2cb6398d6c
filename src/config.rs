use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Cli;
use crate::core::Credentials;
use crate::error::{ClientError, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 1234;

/// Optional settings read from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub image: Option<PathBuf>,
    pub seed: Option<u64>,
    pub read_timeout_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| ClientError::Config(format!("cannot read {path:?}: {err}")))?;
        Self::from_json(&text)
            .map_err(|err| ClientError::Config(format!("{path:?}: {err}")))
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Fully resolved client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
    pub image: PathBuf,
    pub seed: Option<u64>,
    pub read_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Read the `--config` file if one was named, then merge
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    /// Command line over config file over defaults
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let username = required("username", cli.username.clone().or(file.username))?;
        let password = required("password", cli.password.clone().or(file.password))?;
        let image = cli
            .image
            .clone()
            .or(file.image)
            .ok_or_else(|| ClientError::Config("no image given".into()))?;

        Ok(Self {
            host: cli
                .host
                .clone()
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: cli.port.or(file.port).unwrap_or(DEFAULT_PORT),
            credentials: Credentials { username, password },
            image,
            seed: cli.seed.or(file.seed),
            read_timeout: cli
                .read_timeout_ms
                .or(file.read_timeout_ms)
                .map(Duration::from_millis),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Credentials travel as single protocol tokens
fn required(name: &str, value: Option<String>) -> Result<String> {
    match value {
        None => Err(ClientError::Config(format!("no {name} given"))),
        Some(v) if v.is_empty() || v.chars().any(char::is_whitespace) => Err(ClientError::Config(
            format!("{name} must be non-empty and contain no whitespace"),
        )),
        Some(v) => Ok(v),
    }
}

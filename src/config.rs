//! Server configuration from the process environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `SLANG_BACKEND` | `rules` (`rules` or `hosted`) |
//! | `SLANG_FALLBACK_TO_RULES` | `true` |
//! | `HUGGINGFACE_HUB_TOKEN` | unset |
//! | `SLANG_MODEL_ENDPOINT` | `https://api-inference.huggingface.co/models` |
//! | `SLANG_MODEL_ID` | `distilgpt2` |
//! | `SLANG_FALLBACK_MODEL_ID` | unset |
//! | `SLANG_PROMPT_STYLE` | `plain` (`plain` or `instruct`) |
//! | `SLANG_REQUEST_TIMEOUT_SECS` | `30` |
//!
//! A `.env` file in the working directory is loaded first if present.

use crate::error::{Error, Result};
use crate::service::hosted::HostedConfig;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// A credential that never shows up in logs or `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw value. Only call this where the credential is sent.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

/// Which translator the server loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Deterministic rule table.
    #[default]
    Rules,
    /// Hosted text-generation model over HTTP.
    Hosted,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" => Ok(BackendKind::Rules),
            "hosted" | "model" => Ok(BackendKind::Hosted),
            other => Err(Error::Config(format!(
                "unknown backend '{other}' (expected 'rules' or 'hosted')"
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Rules => write!(f, "rules"),
            BackendKind::Hosted => write!(f, "hosted"),
        }
    }
}

/// Web server and translation backend configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub backend: BackendKind,
    /// Serve rule-based translations when the model cannot be loaded.
    pub fallback_to_rules: bool,
    pub hosted: HostedConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backend: BackendKind::Rules,
            fallback_to_rules: true,
            hosted: HostedConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got '{port}'")))?;
        }
        if let Some(backend) = get("SLANG_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(flag) = get("SLANG_FALLBACK_TO_RULES") {
            config.fallback_to_rules = parse_bool("SLANG_FALLBACK_TO_RULES", &flag)?;
        }

        let hosted = &mut config.hosted;
        hosted.token = get("HUGGINGFACE_HUB_TOKEN").map(Secret::new);
        if let Some(endpoint) = get("SLANG_MODEL_ENDPOINT") {
            hosted.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("SLANG_MODEL_ID") {
            hosted.model_id = model;
        }
        hosted.fallback_model_id = get("SLANG_FALLBACK_MODEL_ID");
        if let Some(style) = get("SLANG_PROMPT_STYLE") {
            hosted.prompt_style = style.parse()?;
        }
        if let Some(secs) = get("SLANG_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::Config(format!("SLANG_REQUEST_TIMEOUT_SECS must be a number, got '{secs}'"))
            })?;
            hosted.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Sets the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the listening host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the translation backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Address to bind, e.g. `0.0.0.0:5000`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{key} must be true or false, got '{value}'"))),
    }
}

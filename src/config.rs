//! Loading a [`PolicyConfig`] from a JSON document.
//!
//! Keys follow the names used by the policy itself (`allowedOrigins`,
//! `allowedMethods`, `allowedHeaders`, `exposedHeaders`, `allowCredentials`,
//! `maxAgeSeconds`). The option names of the express `cors` middleware
//! (`origin`, `methods`, `headers`, `credentials`, `maxAge`) are accepted as
//! aliases so existing `cors.json` files keep working. As there, `"origin": true`
//! reflects the request origin rather than answering `*`, so it may be paired
//! with credentials. Unknown keys are ignored.
//!
//! ```json
//! {
//!   "allowedOrigins": ["https://app.example.com"],
//!   "allowedMethods": ["GET", "POST"],
//!   "allowCredentials": true,
//!   "maxAgeSeconds": 600
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::AllowedOrigins;
use crate::policy::{PolicyConfig, ValidationError};
use crate::util::split_list;

const WILDCARD: &str = "*";
const INLINE_SOURCE: &str = "<inline>";

/// Startup failures. Each one is fatal: the server must not bind.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CORS configuration not found at {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CORS configuration at {} could not be parsed: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("CORS configuration is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyDocument {
    #[serde(default, alias = "origin")]
    allowed_origins: Option<OriginSetting>,
    #[serde(default, alias = "methods")]
    allowed_methods: Option<ListSetting>,
    #[serde(default, alias = "headers")]
    allowed_headers: Option<ListSetting>,
    #[serde(default)]
    exposed_headers: Option<ListSetting>,
    #[serde(default, alias = "credentials")]
    allow_credentials: Option<bool>,
    #[serde(default, alias = "maxAge")]
    max_age_seconds: Option<u64>,
    #[serde(default)]
    options_success_status: Option<u16>,
    #[serde(default)]
    reject_unallowed_origins: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OriginSetting {
    Flag(bool),
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListSetting {
    Joined(String),
    Items(Vec<String>),
}

impl ListSetting {
    fn into_items(self) -> Vec<String> {
        match self {
            ListSetting::Joined(value) => split_list(&value).map(str::to_string).collect(),
            ListSetting::Items(values) => values,
        }
    }
}

impl From<OriginSetting> for AllowedOrigins {
    fn from(setting: OriginSetting) -> Self {
        match setting {
            OriginSetting::Flag(true) => AllowedOrigins::reflect(),
            OriginSetting::Flag(false) => AllowedOrigins::none(),
            OriginSetting::One(value) if value.trim() == WILDCARD => AllowedOrigins::any(),
            OriginSetting::One(value) => AllowedOrigins::list([value]),
            OriginSetting::Many(values) if values.iter().any(|v| v.trim() == WILDCARD) => {
                AllowedOrigins::any()
            }
            OriginSetting::Many(values) => AllowedOrigins::list(values),
        }
    }
}

impl PolicyDocument {
    fn into_policy(self) -> PolicyConfig {
        let defaults = PolicyConfig::default();

        PolicyConfig {
            allowed_origins: self
                .allowed_origins
                .map(AllowedOrigins::from)
                .unwrap_or(defaults.allowed_origins),
            allowed_methods: self
                .allowed_methods
                .map(|setting| AllowedMethods::list(setting.into_items()))
                .unwrap_or(defaults.allowed_methods),
            allowed_headers: self
                .allowed_headers
                .map(|setting| AllowedHeaders::list(setting.into_items()))
                .unwrap_or(defaults.allowed_headers),
            exposed_headers: self
                .exposed_headers
                .map(|setting| ExposedHeaders::list(setting.into_items()))
                .unwrap_or(defaults.exposed_headers),
            allow_credentials: self.allow_credentials.unwrap_or(defaults.allow_credentials),
            max_age: self.max_age_seconds.or(defaults.max_age),
            options_success_status: self
                .options_success_status
                .unwrap_or(defaults.options_success_status),
            reject_unallowed_origins: self
                .reject_unallowed_origins
                .unwrap_or(defaults.reject_unallowed_origins),
        }
    }
}

/// Reads and validates the policy stored at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<PolicyConfig, ConfigError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading CORS configuration");

    let text = fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let policy = parse(&text, path)?;
    info!(
        path = %path.display(),
        origins = ?policy.allowed_origins,
        methods = ?policy.allowed_methods.values(),
        credentials = policy.allow_credentials,
        max_age = ?policy.max_age,
        "loaded CORS policy"
    );
    Ok(policy)
}

/// Parses and validates a policy document held in memory.
pub fn from_json(text: &str) -> Result<PolicyConfig, ConfigError> {
    parse(text, Path::new(INLINE_SOURCE))
}

fn parse(text: &str, path: &Path) -> Result<PolicyConfig, ConfigError> {
    let document: PolicyDocument =
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let policy = document.into_policy();
    policy.validate()?;
    Ok(policy)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

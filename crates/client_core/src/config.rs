use std::{fs, io, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://emailmebackend.onrender.com/api/generate";
pub const SETTINGS_FILE: &str = "emailme.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    /// `None` leaves the request unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> Settings {
    let raw = read_settings_file(Path::new(SETTINGS_FILE));
    load_settings_from(raw.as_deref(), |name| std::env::var(name).ok())
}

/// A missing file is silent; any other read failure is logged and skipped.
fn read_settings_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            tracing::warn!("ignoring unreadable {}: {err}", path.display());
            None
        }
    }
}

/// Defaults, then the settings file, then the environment.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.endpoint {
                    settings.endpoint = v;
                }
                if file_cfg.request_timeout_secs.is_some() {
                    settings.request_timeout_secs = file_cfg.request_timeout_secs;
                }
            }
            Err(err) => {
                tracing::warn!("ignoring unreadable {SETTINGS_FILE}: {err}");
            }
        }
    }

    if let Some(v) = env("EMAILME_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = env("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        } else {
            tracing::warn!("ignoring non-numeric APP__REQUEST_TIMEOUT_SECS={v:?}");
        }
    }

    settings
}

/// Normalizes a configured endpoint into an absolute http(s) URL.
///
/// A blank value falls back to [`DEFAULT_ENDPOINT`].
pub fn prepare_endpoint(raw_endpoint: &str) -> anyhow::Result<Url> {
    let raw_endpoint = raw_endpoint.trim();
    let raw_endpoint = if raw_endpoint.is_empty() {
        DEFAULT_ENDPOINT
    } else {
        raw_endpoint
    };

    let url = Url::parse(raw_endpoint)
        .with_context(|| format!("invalid generation endpoint '{raw_endpoint}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("generation endpoint '{raw_endpoint}' uses unsupported scheme '{other}'"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

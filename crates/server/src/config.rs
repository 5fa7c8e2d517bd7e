use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";
/// Longest idle TTL honoured; larger values are clamped.
pub const MAX_ROOM_IDLE_TTL_SECONDS: i64 = 366 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub log_filter: String,
    /// Empty rooms idle this long are dropped. `None` keeps every room.
    pub room_idle_ttl_seconds: Option<i64>,
    pub eviction_interval_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3001".into(),
            log_filter: "info".into(),
            room_idle_ttl_seconds: None,
            eviction_interval_seconds: 60,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    log_filter: Option<String>,
    room_idle_ttl_seconds: Option<i64>,
    eviction_interval_seconds: Option<u64>,
}

/// Defaults, then `server.toml` in the working directory, then environment.
///
/// Problems are reported through `tracing`, so a subscriber must already be
/// installed for them to be seen.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if path.exists() {
        match fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
            .and_then(|raw| apply_file(&mut settings, &raw))
        {
            Ok(()) => {}
            Err(error) => warn!(path = %path.display(), "ignoring settings file: {error:#}"),
        }
    }

    apply_env(&mut settings, lookup);
    settings
}

/// Non-positive disables eviction.
fn idle_ttl(seconds: i64) -> Option<i64> {
    if seconds <= 0 {
        return None;
    }
    if seconds > MAX_ROOM_IDLE_TTL_SECONDS {
        warn!(
            seconds,
            max = MAX_ROOM_IDLE_TTL_SECONDS,
            "room idle ttl too large; clamping"
        );
        return Some(MAX_ROOM_IDLE_TTL_SECONDS);
    }
    Some(seconds)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw).context("invalid server.toml")?;
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.room_idle_ttl_seconds {
        settings.room_idle_ttl_seconds = idle_ttl(v);
    }
    if let Some(v) = file_cfg.eviction_interval_seconds {
        settings.eviction_interval_seconds = v.max(1);
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__ROOM_IDLE_TTL_SECONDS") {
        match v.parse::<i64>() {
            Ok(ttl) => settings.room_idle_ttl_seconds = idle_ttl(ttl),
            Err(_) => warn!(value = %v, "APP__ROOM_IDLE_TTL_SECONDS is not a number"),
        }
    }

    if let Some(v) = lookup("APP__EVICTION_INTERVAL_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.eviction_interval_seconds = parsed.max(1);
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE_NAME: &str = "laneboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tasks_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tasks_url: "http://127.0.0.1:8000/tasks".into(),
            request_timeout_secs: 10,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    tasks_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

/// Defaults, then the settings file, then environment overrides.
///
/// With no explicit `config_path`, `./laneboard.toml` is tried first and then
/// `<config dir>/laneboard/laneboard.toml`.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            apply_file(&mut settings, &raw, path)?;
        }
        None => {
            if let Some(path) = default_settings_paths().into_iter().find(|p| p.is_file()) {
                let raw = fs::read_to_string(&path).with_context(|| {
                    format!("failed to read settings file '{}'", path.display())
                })?;
                apply_file(&mut settings, &raw, &path)?;
            }
        }
    }

    apply_env(&mut settings, env);
    Ok(settings)
}

fn default_settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("laneboard").join(SETTINGS_FILE_NAME));
    }
    paths
}

fn apply_file(settings: &mut Settings, raw: &str, path: &Path) -> anyhow::Result<()> {
    let file: FileSettings = toml::from_str(raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    if let Some(v) = file.tasks_url {
        settings.tasks_url = v;
    }
    if let Some(v) = file.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("LANEBOARD_TASKS_URL") {
        settings.tasks_url = v;
    }
    if let Some(v) = non_empty("APP__TASKS_URL") {
        settings.tasks_url = v;
    }

    if let Some(v) = non_empty("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => warn!(value = %v, %err, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = non_empty("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

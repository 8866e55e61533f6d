use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::report::{Format, RenderOptions};
use crate::{Error, Result};

/// Overrides the settings directory (useful for tests and sandboxed runs).
pub const HOME_ENV: &str = "CLEANRULES_HOME";

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub format: Format,
    pub examples: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: Format::Text,
            examples: true,
        }
    }
}

impl Settings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            examples: self.examples,
        }
    }
}

/// Resolve the settings directory: `$CLEANRULES_HOME`, else `~/.cleanrules/`.
pub fn settings_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cleanrules")
}

pub fn settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

pub fn read_settings() -> Result<Settings> {
    read_settings_from(&settings_dir())
}

/// A missing file yields defaults; an unreadable or malformed one is an error.
pub fn read_settings_from(dir: &Path) -> Result<Settings> {
    let path = settings_path(dir);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(&path).map_err(|e| settings_error(&path, e))?;
    let settings = serde_json::from_str(&raw).map_err(|e| settings_error(&path, e))?;
    tracing::debug!(path = %path.display(), ?settings, "loaded settings");
    Ok(settings)
}

/// Write settings via temp file + rename so readers never see a half-written file.
pub fn write_settings_to(dir: &Path, settings: &Settings) -> Result<()> {
    let path = settings_path(dir);
    fs::create_dir_all(dir).map_err(|e| settings_error(&path, e))?;
    let json = serde_json::to_string_pretty(settings)?;
    let tmp = dir.join(format!(".{SETTINGS_FILE}.tmp"));
    fs::write(&tmp, json).map_err(|e| settings_error(&path, e))?;
    fs::rename(&tmp, &path).map_err(|e| settings_error(&path, e))?;
    tracing::debug!(path = %path.display(), "wrote settings");
    Ok(())
}

fn settings_error(path: &Path, err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Settings {
        path: path.to_path_buf(),
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_settings_from(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let settings = Settings {
            format: Format::Markdown,
            examples: false,
        };
        write_settings_to(&nested, &settings).unwrap();
        assert_eq!(read_settings_from(&nested).unwrap(), settings);
        assert!(!nested.join(".settings.json.tmp").exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(settings_path(dir.path()), r#"{"format":"json"}"#).unwrap();
        let settings = read_settings_from(dir.path()).unwrap();
        assert_eq!(settings.format, Format::Json);
        assert!(settings.examples);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(settings_path(dir.path()), "{ not json").unwrap();
        let err = read_settings_from(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
        assert!(err.to_string().contains("settings.json"));
        let source = std::error::Error::source(&err).expect("parse error kept as source");
        assert!(source.is::<serde_json::Error>());
    }

    #[test]
    fn unknown_format_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(settings_path(dir.path()), r#"{"format":"yaml"}"#).unwrap();
        assert!(read_settings_from(dir.path()).is_err());
    }
}

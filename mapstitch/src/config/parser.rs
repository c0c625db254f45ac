//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::MAX_ZOOM;
use crate::paper::OutputSize;
use crate::provider::ProviderConfig;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// Empty values keep the default.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = non_empty(section.get("type")) {
            ProviderConfig::parse(v)
                .resolve(None)
                .map_err(|e| invalid("provider", "type", v, &e.to_string()))?;
            config.provider.provider_type = v.to_string();
        }
        if let Some(v) = non_empty(section.get("user_agent")) {
            config.provider.user_agent = Some(v.to_string());
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = non_empty(section.get("directory")) {
            config.cache.directory = expand_tilde(v);
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = non_empty(section.get("timeout")) {
            config.download.timeout = parse_positive(v)
                .ok_or_else(|| invalid("download", "timeout", v, "must be a positive integer (seconds)"))?;
        }
        if let Some(v) = non_empty(section.get("parallel")) {
            config.download.parallel = parse_positive(v)
                .ok_or_else(|| invalid("download", "parallel", v, "must be a positive integer"))?;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = non_empty(section.get("zoom")) {
            config.output.zoom = v
                .parse::<u8>()
                .ok()
                .filter(|zoom| *zoom <= MAX_ZOOM)
                .ok_or_else(|| {
                    invalid(
                        "output",
                        "zoom",
                        v,
                        &format!("must be an integer between 0 and {}", MAX_ZOOM),
                    )
                })?;
        }
        if let Some(v) = non_empty(section.get("ppi")) {
            config.output.ppi = parse_positive(v)
                .ok_or_else(|| invalid("output", "ppi", v, "must be a positive integer"))?;
        }
        if let Some(v) = non_empty(section.get("size")) {
            OutputSize::parse(v, config.output.ppi)
                .map_err(|e| invalid("output", "size", v, &e.to_string()))?;
            config.output.size = v.to_string();
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_positive<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr + Default + PartialOrd,
{
    value.parse::<T>().ok().filter(|v| *v > T::default())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

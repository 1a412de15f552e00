//! Engine settings.
//!
//! Loaded from a JSON file (path in `ATTRKIT_SETTINGS`) with individual
//! environment overrides on top. Unknown or missing fields fall back to
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Error, Result};

/// Environment variable naming a settings JSON file.
pub const SETTINGS_ENV: &str = "ATTRKIT_SETTINGS";
/// Environment override for [`Settings::chunk_size`].
pub const CHUNK_SIZE_ENV: &str = "ATTRKIT_CHUNK_SIZE";

const MIN_CHUNK_SIZE: usize = 1;
const MAX_CHUNK_SIZE: usize = 1 << 20;

/// Tunables shared by proxies, parallel helpers and tag comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of point indices handed to one worker at a time.
    pub chunk_size: usize,
    /// Share read proxies with identical descriptors through the buffer pool.
    pub pool_shared_reads: bool,
    /// Tolerance for nearly-equal numeric comparisons.
    pub float_tolerance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: 4096,
            pool_shared_reads: true,
            float_tolerance: 1.0e-8,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let mut settings: Self = serde_json::from_str(&text)?;
        settings.validate();
        Ok(settings)
    }

    /// Save settings as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Defaults, then the file named by `ATTRKIT_SETTINGS`, then overrides.
    ///
    /// A missing or unreadable file is logged and ignored.
    pub fn from_env() -> Self {
        let mut settings = match std::env::var(SETTINGS_ENV) {
            Ok(path) => Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Ok(raw) = std::env::var(CHUNK_SIZE_ENV) {
            match Self::parse_chunk_size(&raw) {
                Ok(size) => settings.chunk_size = size,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        settings.validate();
        settings
    }

    fn parse_chunk_size(raw: &str) -> Result<usize> {
        raw.trim()
            .parse::<usize>()
            .map_err(|_| Error::InvalidSettings(format!("{}='{}' is not a count", CHUNK_SIZE_ENV, raw)))
    }

    /// Clamp out-of-range values back into their valid ranges.
    pub fn validate(&mut self) {
        self.chunk_size = self.chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
        if !self.float_tolerance.is_finite() || self.float_tolerance < 0.0 {
            self.float_tolerance = Self::default().float_tolerance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let mut s = Settings::default();
        let before = s.clone();
        s.validate();
        assert_eq!(s, before);
    }

    #[test]
    fn test_validate_clamps() {
        let mut s = Settings { chunk_size: 0, pool_shared_reads: false, float_tolerance: -1.0 };
        s.validate();
        assert_eq!(s.chunk_size, 1);
        assert_eq!(s.float_tolerance, Settings::default().float_tolerance);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let s = Settings { chunk_size: 128, pool_shared_reads: false, float_tolerance: 0.5 };
        s.save(temp.path()).expect("Failed to save settings");
        let loaded = Settings::load(temp.path()).expect("Failed to load settings");
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        std::fs::write(temp.path(), r#"{ "chunk_size": 64 }"#).expect("Failed to write");
        let loaded = Settings::load(temp.path()).expect("Failed to load settings");
        assert_eq!(loaded.chunk_size, 64);
        assert!(loaded.pool_shared_reads);
    }

    #[test]
    fn test_bad_json_is_error() {
        let temp = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        std::fs::write(temp.path(), "not json").expect("Failed to write");
        assert!(matches!(Settings::load(temp.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_chunk_size() {
        assert_eq!(Settings::parse_chunk_size(" 512 ").ok(), Some(512));
        assert!(Settings::parse_chunk_size("lots").is_err());
    }
}

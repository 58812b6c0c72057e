use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "cogload.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Lowest acceptable subjective rating
    #[serde(default = "default_scale_min")]
    pub scale_min: f64,

    /// Highest acceptable subjective rating
    #[serde(default = "default_scale_max")]
    pub scale_max: f64,

    /// Relative band around the first-half mean within which the trend is neutral
    #[serde(default = "default_trend_tolerance")]
    pub trend_tolerance: f64,

    /// Confidence below which a series is flagged
    #[serde(default = "default_low_confidence_threshold")]
    pub low_confidence_threshold: f64,
}

const fn default_scale_min() -> f64 {
    1.0
}

const fn default_scale_max() -> f64 {
    5.0
}

const fn default_trend_tolerance() -> f64 {
    0.05
}

const fn default_low_confidence_threshold() -> f64 {
    0.5
}

impl Config {
    /// Load configuration from an explicit path, the first existing candidate, or use defaults
    ///
    /// Returns the configuration along with the path it was read from, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, parsed, or fails validation
    pub fn load(config_path: Option<&Utf8Path>, candidates: &[Utf8PathBuf]) -> Result<(Self, Option<Utf8PathBuf>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading cogload configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let mut found = None;
            for path in candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading cogload configuration file '{path}'")),
                }
            }

            match found {
                Some(found) => found,
                None => return Ok((Self::default(), None)),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok((config, Some(final_path)))
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if values are out of range or inconsistent
    pub fn validate(&self) -> Result<()> {
        if !self.scale_min.is_finite() || !self.scale_max.is_finite() {
            return Err(app_err!(
                "scale_min and scale_max must be finite, got {} and {}",
                self.scale_min,
                self.scale_max
            ));
        }

        if self.scale_min >= self.scale_max {
            return Err(app_err!(
                "scale_min ({}) must be less than scale_max ({})",
                self.scale_min,
                self.scale_max
            ));
        }

        if !(0.0..1.0).contains(&self.trend_tolerance) {
            return Err(app_err!("trend_tolerance must be at least 0 and below 1, got {}", self.trend_tolerance));
        }

        if !(0.0..=1.0).contains(&self.low_confidence_threshold) {
            return Err(app_err!(
                "low_confidence_threshold must be between 0 and 1, got {}",
                self.low_confidence_threshold
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale_min: default_scale_min(),
            scale_max: default_scale_max(),
            trend_tolerance: default_trend_tolerance(),
            low_confidence_threshold: default_low_confidence_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_embedded() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_validate_scale_inverted() {
        let config = Config { scale_min: 5.0, scale_max: 1.0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_scale_equal() {
        let config = Config { scale_min: 3.0, scale_max: 3.0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_scale_not_finite() {
        let config = Config { scale_max: f64::INFINITY, ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { scale_min: f64::NAN, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_trend_tolerance_range() {
        let config = Config { trend_tolerance: -0.1, ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { trend_tolerance: 1.0, ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { trend_tolerance: 0.0, ..Config::default() };
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_low_confidence_threshold_range() {
        let config = Config { low_confidence_threshold: 1.5, ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { low_confidence_threshold: 1.0, ..Config::default() };
        config.validate().unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = temp_path(&tmp, CONFIG_FILE_NAME);
        Config::save_default(&output_path).unwrap();

        let (loaded, path) = Config::load(Some(&output_path), &[]).unwrap();
        assert_eq!(loaded, Config::default());
        assert_eq!(path, Some(output_path));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_candidates_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let (config, path) = Config::load(None, &[temp_path(&tmp, "absent.toml")]).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_none());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_first_existing_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        let second = temp_path(&tmp, "second.toml");
        fs::write(&second, "scale_max = 10.0\n").unwrap();

        let (config, path) = Config::load(None, &[temp_path(&tmp, "first.toml"), second.clone()]).unwrap();
        assert!((config.scale_max - 10.0).abs() < f64::EPSILON);
        assert!((config.scale_min - 1.0).abs() < f64::EPSILON);
        assert_eq!(path, Some(second));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_explicit_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = temp_path(&tmp, "missing.toml");
        assert!(Config::load(Some(&missing), &[]).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_unknown_field_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = temp_path(&tmp, "unknown.toml");
        fs::write(&path, "unknown_field = 1\n").unwrap();
        assert!(Config::load(Some(&path), &[]).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_invalid_values_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let path = temp_path(&tmp, "invalid.toml");
        fs::write(&path, "scale_min = 6.0\n").unwrap();
        assert!(Config::load(Some(&path), &[]).is_err());
    }

    #[test]
    fn test_default_config_toml_is_not_empty() {
        assert!(!DEFAULT_CONFIG_TOML.is_empty());
    }
}

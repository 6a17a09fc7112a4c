use crate::Result;
use crate::fields::{Humanizer, SortSpec};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked for in the working directory
pub const CONFIG_FILE_NAME: &str = "github-report.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the GitHub REST API
    pub api_url: Url,

    /// File to read a personal access token from when none is given on the command line
    pub token_file: Utf8PathBuf,

    /// Field to sort repositories by, with a leading `-` for descending order
    pub sort: String,

    /// Maximum time a single git command may take
    #[serde(with = "humantime_serde")]
    pub git_timeout: Duration,

    /// Separator between digit groups in humanized counts
    pub thousands_separator: char,

    /// strftime pattern for humanized timestamps
    pub datetime_format: String,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Settings missing from the file keep their default values.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config = Self::from_toml(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: super::LOG_TARGET, "Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Parse `text` on top of the defaults.
    fn from_toml(text: &str) -> core::result::Result<Self, toml::de::Error> {
        let mut merged: toml::Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
        let overrides: toml::Table = toml::from_str(text)?;
        merged.extend(overrides);
        toml::Value::Table(merged).try_into()
    }

    /// The default sort order.
    pub fn sort_spec(&self) -> Result<SortSpec> {
        SortSpec::parse(&self.sort)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(app_err!("api_url must be an http or https URL, got '{}'", self.api_url));
        }

        if self.git_timeout.is_zero() {
            return Err(app_err!("git_timeout must be greater than zero"));
        }

        let _ = self.sort_spec().map_err(|e| e.enrich("invalid sort setting"))?;
        let _ = Humanizer::new(self.thousands_separator, &self.datetime_format)
            .map_err(|e| e.enrich("invalid datetime_format setting"))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(text: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        fs::write(&path, text).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.github.com/");
        assert_eq!(config.token_file, ".token");
        assert_eq!(config.sort, "full_name");
        assert_eq!(config.git_timeout, Duration::from_secs(300));
        assert_eq!(config.thousands_separator, ',');
        assert_eq!(config.datetime_format, "%x %X");
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = Config { api_url: Url::parse("ftp://example.com/").unwrap(), ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config { git_timeout: Duration::ZERO, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_rejects_empty_datetime_format() {
        let config = Config { datetime_format: String::new(), ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_rejects_bad_sort() {
        let config = Config { sort: "-".into(), ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_sort_spec() {
        let config = Config { sort: "-stars".into(), ..Config::default() };
        assert!(config.sort_spec().unwrap().is_descending());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_partial_file_keeps_defaults() {
        let (_tmp, path) = temp_config("sort = \"-stars\"\ngit_timeout = \"90s\"\n");
        let config = Config::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(config.sort, "-stars");
        assert_eq!(config.git_timeout, Duration::from_secs(90));
        assert_eq!(config.token_file, ".token");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_from_base_dir() {
        let (tmp, _path) = temp_config("thousands_separator = \".\"\n");
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config.thousands_separator, '.');
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config.sort, "full_name");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_unknown_keys() {
        let (_tmp, path) = temp_config("colour = \"red\"\n");
        let err = Config::load(Utf8Path::new("."), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("parsing configuration file"), "{err}");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_invalid_values() {
        let (_tmp, path) = temp_config("api_url = \"file:///tmp/api\"\n");
        let _ = Config::load(Utf8Path::new("."), Some(&path)).unwrap_err();
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Utf8Path::new("."), Some(Utf8Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading configuration file"), "{err}");
    }
}

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ScrapeError, ValidationError};
use crate::http_client::DEFAULT_USER_AGENT;
use crate::resolve::HrefMatch;
use crate::robots::DEFAULT_ROBOTS_AGENT;

/// Environment variable naming the target directory.
pub const TARGET_PATH_ENV: &str = "TARGET_PATH";
pub const SETTING_FILE: &str = "setting.json";
pub const RESULT_FILE: &str = "result.json";

/// Contents of `setting.json`.
///
/// Missing keys decode as empty strings and are rejected by [`Settings::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub selector: String,
}

impl Settings {
    /// Only emptiness is checked here; a malformed `url` is reported later
    /// by whichever step parses it first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        if self.selector.is_empty() {
            return Err(ValidationError::MissingSelector);
        }
        Ok(())
    }
}

/// Options for a single scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub target_dir: PathBuf,
    pub robots_agent: String,
    pub user_agent: String,
    pub href_match: HrefMatch,
}

impl Config {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            robots_agent: DEFAULT_ROBOTS_AGENT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            href_match: HrefMatch::default(),
        }
    }

    pub fn from_env() -> Result<Self, ScrapeError> {
        match env::var_os(TARGET_PATH_ENV) {
            Some(path) if !path.is_empty() => Ok(Self::new(path)),
            _ => Err(ScrapeError::ConfigMissingPath),
        }
    }

    pub fn setting_path(&self) -> PathBuf {
        self.target_dir.join(SETTING_FILE)
    }

    pub fn result_path(&self) -> PathBuf {
        self.target_dir.join(RESULT_FILE)
    }
}

/// Reads and validates `setting.json` from the configured target directory.
pub fn load_settings(config: &Config) -> Result<Settings, ScrapeError> {
    let dir = &config.target_dir;
    let dir_meta = fs::metadata(dir).map_err(|source| ScrapeError::TargetPathUnavailable {
        path: dir.clone(),
        source,
    })?;
    if !dir_meta.is_dir() {
        return Err(ScrapeError::PathNotDirectory(dir.clone()));
    }

    let path = config.setting_path();
    let settings = read_settings(&path)?;
    settings
        .validate()
        .map_err(|source| ScrapeError::ConfigValidationError { path, source })?;

    Ok(settings)
}

fn read_settings(path: &Path) -> Result<Settings, ScrapeError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(ScrapeError::SettingFileIsDirectory(path.to_path_buf()));
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ScrapeError::SettingFileMissing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ScrapeError::SettingFileUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let content = fs::read_to_string(path).map_err(|source| ScrapeError::SettingFileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ScrapeError::ConfigDecodeError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn dir_with_setting(content: &str) -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTING_FILE), content).unwrap();
        let config = Config::new(dir.path());
        (dir, config)
    }

    #[rstest]
    #[case("", "a", Err(ValidationError::MissingUrl))]
    #[case("", "", Err(ValidationError::MissingUrl))]
    #[case("http://example.com", "", Err(ValidationError::MissingSelector))]
    #[case("not a url", "a", Ok(()))]
    #[case("http://example.com", "a.item", Ok(()))]
    fn test_validate(
        #[case] url: &str,
        #[case] selector: &str,
        #[case] expected: Result<(), ValidationError>,
    ) {
        let settings = Settings {
            url: url.to_string(),
            selector: selector.to_string(),
        };
        assert_eq!(settings.validate(), expected);
    }

    #[test]
    fn test_load_settings() {
        let (_dir, config) =
            dir_with_setting(r#"{"url": "http://example.test/list", "selector": "a.item"}"#);
        assert_eq!(
            load_settings(&config).unwrap(),
            Settings {
                url: "http://example.test/list".to_string(),
                selector: "a.item".to_string(),
            }
        );
    }

    #[test]
    fn test_load_settings_ignores_unknown_keys() {
        let (_dir, config) =
            dir_with_setting(r#"{"url": "http://x.test/", "selector": "a", "note": 1}"#);
        assert!(load_settings(&config).is_ok());
    }

    #[rstest]
    #[case(r#"{"selector": "a"}"#, ValidationError::MissingUrl)]
    #[case(r#"{"url": "http://x.test/"}"#, ValidationError::MissingSelector)]
    #[case(r#"{"url": "", "selector": "a"}"#, ValidationError::MissingUrl)]
    fn test_load_settings_validation(#[case] content: &str, #[case] expected: ValidationError) {
        let (_dir, config) = dir_with_setting(content);
        match load_settings(&config) {
            Err(ScrapeError::ConfigValidationError { source, path }) => {
                assert_eq!(source, expected);
                assert_eq!(path, config.setting_path());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    #[case("{")]
    #[case("null")]
    #[case(r#"{"url": 1, "selector": "a"}"#)]
    #[case("")]
    fn test_load_settings_decode_error(#[case] content: &str) {
        let (_dir, config) = dir_with_setting(content);
        assert!(matches!(
            load_settings(&config),
            Err(ScrapeError::ConfigDecodeError { .. })
        ));
    }

    #[test]
    fn test_load_settings_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("nope"));
        assert!(matches!(
            load_settings(&config),
            Err(ScrapeError::TargetPathUnavailable { .. })
        ));
    }

    #[test]
    fn test_load_settings_path_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            load_settings(&Config::new(file)),
            Err(ScrapeError::PathNotDirectory(_))
        ));
    }

    #[test]
    fn test_load_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_settings(&Config::new(dir.path())),
            Err(ScrapeError::SettingFileMissing(_))
        ));
    }

    #[test]
    fn test_load_settings_file_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(SETTING_FILE)).unwrap();
        assert!(matches!(
            load_settings(&Config::new(dir.path())),
            Err(ScrapeError::SettingFileIsDirectory(_))
        ));
    }

    #[test]
    fn test_load_settings_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTING_FILE), [0xff, 0xfe, b'{', b'}']).unwrap();

        let err = load_settings(&Config::new(dir.path())).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::SettingFileUnreadable { ref source, .. }
                if source.kind() == ErrorKind::InvalidData
        ));
    }

    #[test]
    fn test_paths_with_trailing_slash() {
        let config = Config::new("/data/site/");
        assert_eq!(config.setting_path(), PathBuf::from("/data/site/setting.json"));
        assert_eq!(config.result_path(), PathBuf::from("/data/site/result.json"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new("/data/site");
        assert_eq!(config.robots_agent, "bot");
        assert!(config.user_agent.starts_with("site-scraper/"));
        assert_eq!(config.href_match, HrefMatch::Prefix);
    }
}

//! Configuration loading.
//!
//! Settings live in `$WIDD_HOME/config.toml` (default `~/.widd`). Every
//! field is optional in the file; missing values fall back to the built-in
//! defaults. CLI overrides are applied last.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;
use crate::error::WiddErr;

pub const DEFAULT_WEBHOOK_URL: &str =
    "https://widd.ai/webhook/7afd6285-3ca0-49f6-9308-f8413abbf587/chat";
pub const DEFAULT_SESSION_ID: &str = "newsessionasdasa";
pub const DEFAULT_ACCESS_CODE: &str = "tt55oo77";

#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    pub session_id: String,
    /// Static access code gating the UI. Not a security boundary: it is a
    /// plain string comparison, kept for parity with the hosted client.
    /// `None` disables the gate.
    pub access_code: Option<String>,
    pub widd_home: PathBuf,
}

/// On-disk representation of `config.toml`.
#[derive(Debug, Default, Deserialize)]
struct ConfigToml {
    webhook_url: Option<String>,
    session_id: Option<String>,
    access_code: Option<String>,
}

/// Values the CLI may force over the file.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub webhook_url: Option<String>,
    pub session_id: Option<String>,
    /// Skip the access-code screen entirely.
    pub skip_auth: bool,
}

impl Config {
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let widd_home = find_widd_home()?;
        Self::load_from_home(widd_home, overrides)
    }

    fn load_from_home(widd_home: PathBuf, overrides: ConfigOverrides) -> Result<Self> {
        let file = load_config_toml(&widd_home.join("config.toml"))?;

        let access_code = if overrides.skip_auth {
            None
        } else {
            Some(
                file.access_code
                    .unwrap_or_else(|| DEFAULT_ACCESS_CODE.to_string()),
            )
        };

        Ok(Self {
            webhook_url: overrides
                .webhook_url
                .or(file.webhook_url)
                .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string()),
            session_id: overrides
                .session_id
                .or(file.session_id)
                .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string()),
            access_code,
            widd_home,
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.widd_home.join("log")
    }
}

fn load_config_toml(path: &Path) -> Result<ConfigToml> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigToml::default()),
        Err(err) => Err(WiddErr::Io(err)),
    }
}

/// Resolve the widd home directory: `$WIDD_HOME` when set and non-empty,
/// otherwise `~/.widd`.
pub fn find_widd_home() -> Result<PathBuf> {
    match std::env::var("WIDD_HOME") {
        Ok(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => dirs::home_dir()
            .map(|home| home.join(".widd"))
            .ok_or(WiddErr::NoHome),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_config_file_uses_defaults() {
        let home = tempfile::tempdir().expect("tempdir");
        let config =
            Config::load_from_home(home.path().to_path_buf(), ConfigOverrides::default())
                .expect("load");
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.session_id, DEFAULT_SESSION_ID);
        assert_eq!(config.access_code.as_deref(), Some(DEFAULT_ACCESS_CODE));
    }

    #[test]
    fn config_file_values_win_over_defaults() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            home.path().join("config.toml"),
            r#"
webhook_url = "https://example.test/hook"
session_id = "report-session"
access_code = "sesame"
"#,
        )
        .expect("write config");
        let config =
            Config::load_from_home(home.path().to_path_buf(), ConfigOverrides::default())
                .expect("load");
        assert_eq!(config.webhook_url, "https://example.test/hook");
        assert_eq!(config.session_id, "report-session");
        assert_eq!(config.access_code.as_deref(), Some("sesame"));
    }

    #[test]
    fn overrides_win_over_config_file() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            home.path().join("config.toml"),
            "webhook_url = \"https://example.test/hook\"\n",
        )
        .expect("write config");
        let overrides = ConfigOverrides {
            webhook_url: Some("https://other.test/hook".to_string()),
            session_id: None,
            skip_auth: true,
        };
        let config = Config::load_from_home(home.path().to_path_buf(), overrides).expect("load");
        assert_eq!(config.webhook_url, "https://other.test/hook");
        assert_eq!(config.access_code, None);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(home.path().join("config.toml"), "webhook_url = [1\n")
            .expect("write config");
        let result =
            Config::load_from_home(home.path().to_path_buf(), ConfigOverrides::default());
        assert!(matches!(result, Err(WiddErr::TomlParse(_))));
    }
}

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WiddErr>;

#[derive(Error, Debug)]
pub enum WiddErr {
    /// The webhook answered with a non-success HTTP status. The body is kept
    /// for the log; the user only sees the status line.
    #[error("webhook request failed with status: {0}")]
    UnexpectedStatus(StatusCode, String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config.toml: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("could not determine a home directory for WIDD_HOME")]
    NoHome,
}

use reqwest::StatusCode;
use std::time::Duration;

/// Logging in to the controller failed.
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("login request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("login timed out after {0:?}")]
    Timeout(Duration),
    #[error("controller rejected the login (HTTP {0})")]
    Rejected(StatusCode),
}

impl AuthError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err)
        }
    }
}

/// The health query did not produce a response body.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("health request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("health request timed out after {0:?}")]
    Timeout(Duration),
    #[error("controller answered the health request with HTTP {0}")]
    Status(StatusCode),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err)
        }
    }
}

/// The health document is valid JSON but not shaped the way we expect.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("response has no `data` field")]
    MissingData,
    #[error("`data` is not an array")]
    NotAnArray,
    #[error("`data` has {len} entries, expected at least 3")]
    TooShort { len: usize },
    #[error("`data[2]` has no `{0}` field")]
    MissingField(&'static str),
    #[error("`data[2].{0}` is not a number")]
    NotNumeric(&'static str),
}

/// Everything that can go wrong during one poll cycle. None of it is fatal.
#[derive(thiserror::Error, Debug)]
pub enum PollError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("controller response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("couldn't read the data from the controller response, check your credentials or the site name: {0}")]
    Schema(#[from] SchemaError),
}

/// The HTTP client for the controller could not be set up.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("{0} cannot be used as a controller URL")]
    InvalidEndpoint(url::Url),
    #[error("failed to build the HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

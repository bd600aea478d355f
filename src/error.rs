use std::{io, path::PathBuf};

use http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong in the servers or the telemetry bot.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Http(#[from] hyper::Error),

    #[error("failed to build request: {0}")]
    Request(#[from] http::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported URL {0}, only plain http:// targets can be reached")]
    UnsupportedUrl(String),

    #[error("{method} {url} returned {status}")]
    Status {
        method: http::Method,
        url: String,
        status: StatusCode,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

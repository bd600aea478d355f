//! Server configuration. A server is described either by command line flags
//! or by a small TOML file:
//!
//! ```toml
//! listen = "127.0.0.1:8081"
//! name = "lguide"
//! fixtures = "testdata/lguide"
//! ```
//!
//! ```toml
//! listen = "127.0.0.1:8082"
//! file = "/tmp/page.html"
//! ```

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::Error;

/// Description of a single server instance. Immutable once the server starts,
/// every connection task reads it through a shared reference.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Server {
    /// Socket address where this server listens. Port 0 lets the OS pick one.
    pub listen: SocketAddr,

    /// What the server responds with.
    #[serde(flatten)]
    pub action: Action,

    /// Optional server name to show in logs.
    pub name: Option<String>,
}

/// Content served for every request.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Look up the `slovo` query parameter in the lexeme table and answer with
    /// the matching file from this directory.
    Fixtures(PathBuf),

    /// Answer every request with the contents of this file.
    File(PathBuf),
}

impl Server {
    /// Fixture server listening on `listen`, reading fixtures from `base_path`.
    pub fn fixtures(listen: SocketAddr, base_path: impl Into<PathBuf>) -> Self {
        Self {
            listen,
            action: Action::Fixtures(base_path.into()),
            name: None,
        }
    }

    /// Static file server listening on `listen`, serving `doc_path`.
    pub fn file(listen: SocketAddr, doc_path: impl Into<PathBuf>) -> Self {
        Self {
            listen,
            action: Action::File(doc_path.into()),
            name: None,
        }
    }

    /// Reads a server description from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Name used in log lines: the listening address plus the optional name.
    pub fn log_name(&self, address: SocketAddr) -> String {
        match self.name {
            Some(ref name) => format!("{address} ({name})"),
            None => address.to_string(),
        }
    }
}

pub mod default {
    //! Default values for command line options.

    pub const FIXTURES_LISTEN: &str = "127.0.0.1:8081";

    pub const FILE_LISTEN: &str = "127.0.0.1:8082";

    pub const FIXTURES_BASE_PATH: &str = "testdata/lguide";
}

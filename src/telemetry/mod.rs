//! Synthetic telemetry. The bot simulates a single user session: it looks up
//! random words in the language guide and reports batches of made up UI
//! actions to the telemetry endpoint, all under the same session cookie.

mod bot;

use std::{
    collections::BTreeMap,
    fmt,
    path::Path,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use bot::Bot;

use crate::Error;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "wag.session";

/// Length of generated session identifiers.
pub const SESSION_ID_LEN: usize = 64;

/// One simulated user interaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub action_name: String,
    pub is_mobile: bool,
    pub is_subquery: bool,
    pub tile_name: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Request body of the telemetry endpoint.
#[derive(Serialize, Debug)]
pub(crate) struct TelemetryBatch<'a> {
    pub telemetry: &'a [Telemetry],
}

/// Bot run configuration, read from a JSON file:
///
/// ```json
/// {"queries": ["nebo", "dělat"], "actions": {"click": 3, "scroll": 1}}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Conf {
    /// Terms the bot searches for, one picked at random per iteration.
    pub queries: Vec<String>,

    /// Action name to number of events generated per iteration.
    #[serde(default)]
    pub actions: BTreeMap<String, u32>,
}

impl Conf {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_slice(&content)?)
    }
}

/// Opaque token identifying the simulated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    /// Random token of [`SESSION_ID_LEN`] characters between `a` and `{`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..SESSION_ID_LEN)
            .map(|_| char::from(rng.random_range(b'a'..=b'{')))
            .collect();

        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Cookie` header.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates `count` events for each action. Every timestamp is `now` plus a
/// uniformly random fraction of `window`, so all of them fall within
/// `[now, now + window]` at millisecond precision.
///
/// Fails with [`Error::Config`] when `now + window` can't be expressed as a
/// millisecond timestamp.
pub fn generate_telemetry<R: Rng + ?Sized>(
    actions: &BTreeMap<String, u32>,
    window: Duration,
    now: SystemTime,
    rng: &mut R,
) -> Result<Vec<Telemetry>, Error> {
    let now = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    window_end(now, window)?;

    let mut telemetry = Vec::with_capacity(actions.values().map(|count| *count as usize).sum());

    for (action, count) in actions {
        for _ in 0..*count {
            let offset = Duration::try_from_secs_f64(window.as_secs_f64() * rng.random::<f64>())
                .map_err(|_| window_too_large(window))?;

            telemetry.push(Telemetry {
                action_name: action.clone(),
                is_mobile: false,
                is_subquery: false,
                tile_name: String::from("-"),
                timestamp: timestamp(now, offset).ok_or_else(|| window_too_large(window))?,
            });
        }
    }

    Ok(telemetry)
}

/// Last timestamp a batch generated at `now` can carry.
pub(crate) fn window_end(now: Duration, window: Duration) -> Result<i64, Error> {
    timestamp(now, window).ok_or_else(|| window_too_large(window))
}

fn timestamp(now: Duration, offset: Duration) -> Option<i64> {
    let at = now.checked_add(offset)?;
    i64::try_from(at.as_millis()).ok()
}

fn window_too_large(window: Duration) -> Error {
    Error::Config(format!("telemetry window of {}s is too large", window.as_secs()))
}

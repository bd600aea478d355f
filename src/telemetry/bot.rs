use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hyper::{header, Method};
use rand::{seq::IndexedRandom, Rng};
use url::Url;

use super::{generate_telemetry, window_end, Conf, SessionId, Telemetry, TelemetryBatch};
use crate::{
    http::{body, client},
    Error,
};

/// Path of the language guide, relative to the root URL.
pub const LANGUAGE_GUIDE_PATH: &str = "language-guide";

/// Path of the telemetry endpoint, relative to the root URL.
pub const TELEMETRY_PATH: &str = "telemetry";

/// Simulated user. Requests and telemetry submissions are strictly sequential
/// and the first failure aborts the run.
pub struct Bot<R> {
    root_url: Url,
    session: SessionId,
    conf: Conf,
    window: Duration,
    rng: R,
}

impl<R: Rng> Bot<R> {
    /// `window` is both the spread of telemetry timestamps and the pause
    /// between iterations. Fails if there are no queries to pick from or if
    /// timestamps within `window` would not fit in a telemetry event.
    pub fn new(
        root_url: Url,
        session: SessionId,
        conf: Conf,
        window: Duration,
        rng: R,
    ) -> Result<Self, Error> {
        if conf.queries.is_empty() {
            return Err(Error::Config(String::from("no queries to choose from")));
        }

        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        window_end(now, window)?;

        Ok(Self {
            root_url,
            session,
            conf,
            window,
            rng,
        })
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Runs `repeat` iterations of request, telemetry and pause.
    pub async fn run(&mut self, repeat: usize) -> Result<(), Error> {
        for i in 1..=repeat {
            tracing::info!("Request {i}/{repeat}");

            self.make_request().await?;

            let telemetry = generate_telemetry(
                &self.conf.actions,
                self.window,
                SystemTime::now(),
                &mut self.rng,
            )?;
            tracing::info!("Generated {} telemetry events", telemetry.len());

            self.send_telemetry(&telemetry).await?;

            tracing::info!("Waiting {}s", self.window.as_secs_f64());
            tokio::time::sleep(self.window).await;
        }

        Ok(())
    }

    /// Looks up a random query term in the language guide. The response is
    /// read and discarded.
    pub async fn make_request(&mut self) -> Result<(), Error> {
        let Some(term) = self.conf.queries.choose(&mut self.rng) else {
            return Err(Error::Config(String::from("no queries to choose from")));
        };

        let mut url = self.root_url.join(LANGUAGE_GUIDE_PATH)?;
        url.query_pairs_mut().append_pair("q", term);

        tracing::info!("Making request {url}");
        client::send(Method::GET, &url, &[self.cookie()], body::empty()).await?;
        tracing::debug!("Request done");

        Ok(())
    }

    /// Posts a telemetry batch. The response is read and discarded.
    pub async fn send_telemetry(&self, telemetry: &[Telemetry]) -> Result<(), Error> {
        let url = self.root_url.join(TELEMETRY_PATH)?;
        let payload = serde_json::to_vec(&TelemetryBatch { telemetry })?;

        let headers = [
            (header::CONTENT_TYPE, String::from("application/json")),
            self.cookie(),
        ];

        tracing::info!("Sending telemetry to {url}");
        client::send(Method::POST, &url, &headers, body::full(payload)).await?;
        tracing::debug!("Telemetry sent");

        Ok(())
    }

    fn cookie(&self) -> (header::HeaderName, String) {
        (header::COOKIE, self.session.cookie())
    }
}

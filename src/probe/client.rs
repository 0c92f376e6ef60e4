//! HTTP client that runs probe checks against live services.

use std::time::Duration;

use futures::future::join_all;
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};
use url::Url;

use super::checks::{echo_payload, evaluate, Endpoint};
use super::report::{CheckOutcome, ProbeReport};
use crate::error::Result;
use crate::metrics;

/// Parse a target base URL, normalising it to end in `/` so relative
/// endpoint paths join beneath any prefix.
pub fn parse_target(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Probe client.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    /// HTTP client for checks.
    http: reqwest::Client,
}

impl ProbeClient {
    /// Create a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Run every check against every target concurrently.
    pub async fn probe_all(&self, targets: &[Url]) -> ProbeReport {
        let runs = targets.iter().map(|target| self.probe_target(target));
        let outcomes = join_all(runs).await.into_iter().flatten().collect();
        ProbeReport { outcomes }
    }

    /// Run every check against one target concurrently.
    #[instrument(skip_all, fields(target = %target))]
    pub async fn probe_target(&self, target: &Url) -> Vec<CheckOutcome> {
        join_all(Endpoint::iter().map(|endpoint| self.check(target, endpoint))).await
    }

    /// Run one check.
    pub async fn check(&self, target: &Url, endpoint: Endpoint) -> CheckOutcome {
        let timer = metrics::timer_probe_check();
        let result = self.send(target, endpoint).await;
        let elapsed_ms = timer.elapsed_ms();

        let (status, failure) = match result {
            Ok((status, body)) => (Some(status), evaluate(endpoint, status, &body).err()),
            Err(e) => (None, Some(e.to_string())),
        };

        match &failure {
            None => debug!(%endpoint, elapsed_ms, "check passed"),
            Some(reason) => warn!(%endpoint, reason = %reason, "check failed"),
        }
        metrics::inc_probe_checks(&endpoint.to_string(), failure.is_none());

        CheckOutcome {
            target: target.to_string(),
            endpoint,
            status,
            elapsed_ms,
            failure,
        }
    }

    async fn send(&self, target: &Url, endpoint: Endpoint) -> Result<(u16, Vec<u8>)> {
        let url = target.join(endpoint.path())?;
        let mut request = self.http.request(endpoint.method(), url);
        if endpoint == Endpoint::Echo {
            request = request.json(&echo_payload());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

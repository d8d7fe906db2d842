//! Blocking HTTP/JSON backend for the simulation service.

use std::time::Duration;

use geodesic_core::Variant;
use geodesic_request::{PotentialRequest, PotentialResult, TrajectoryRequest, TrajectoryResult};
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{GatewayError, SimulationBackend};

pub use geodesic_core::constants::DEFAULT_BASE_URL;

/// Simulation service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Backend without a request timeout; a hung call blocks until the service answers.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, GatewayError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            log::warn!("POST {url} returned {status}");
            return Err(GatewayError::from_status(status.as_u16(), text));
        }
        serde_json::from_str(&text).map_err(|source| GatewayError::Decode {
            endpoint: url,
            source,
        })
    }
}

impl SimulationBackend for HttpBackend {
    fn trajectory(
        &self,
        variant: Variant,
        request: &TrajectoryRequest,
    ) -> Result<TrajectoryResult, GatewayError> {
        self.post(variant.trajectory_path(), request)
    }

    fn potential(
        &self,
        variant: Variant,
        request: &PotentialRequest,
    ) -> Result<PotentialResult, GatewayError> {
        self.post(variant.potential_path(), request)
    }
}

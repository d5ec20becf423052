//! Best-effort carbon-intensity lookup
//!
//! Talks to an endpoint shaped like the GB carbon intensity API:
//!
//! ```text
//! {"data": [{"from": "...", "to": "...",
//!            "intensity": {"forecast": 266, "actual": 263, "index": "moderate"}}]}
//! ```
//!
//! Every failure is returned as an [`IntensityError`]; nothing here panics.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lookup failures
#[derive(Error, Debug)]
pub enum IntensityError {
    /// Connection, DNS or timeout failure
    #[error("carbon intensity service unreachable: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("carbon intensity service returned HTTP {0}")]
    Status(u16),

    /// Body was not the expected JSON
    #[error("carbon intensity response could not be decoded: {0}")]
    Decode(String),
}

/// One half-hour intensity period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityReading {
    /// Period start (ISO 8601)
    pub from: Option<String>,
    /// Period end (ISO 8601)
    pub to: Option<String>,
    /// Forecast gCO2/kWh
    pub forecast: Option<f64>,
    /// Measured gCO2/kWh
    pub actual: Option<f64>,
    /// Band: very low, low, moderate, high, very high
    pub index: Option<String>,
}

impl IntensityReading {
    /// Extract the first period from a response body
    pub fn from_json(body: &serde_json::Value) -> Result<Self, IntensityError> {
        let period = match &body["data"] {
            serde_json::Value::Array(items) => items.first(),
            obj @ serde_json::Value::Object(_) => Some(obj),
            _ => None,
        }
        .ok_or_else(|| IntensityError::Decode("missing 'data' entry".to_string()))?;

        let intensity = period
            .get("intensity")
            .filter(|v| v.is_object())
            .ok_or_else(|| IntensityError::Decode("missing 'intensity' object".to_string()))?;

        Ok(Self {
            from: period["from"].as_str().map(str::to_string),
            to: period["to"].as_str().map(str::to_string),
            forecast: intensity["forecast"].as_f64(),
            actual: intensity["actual"].as_f64(),
            index: intensity["index"].as_str().map(str::to_string),
        })
    }
}

/// Blocking HTTP client; call it from `spawn_blocking`
#[derive(Debug, Clone)]
pub struct IntensityClient {
    url: String,
    agent: ureq::Agent,
}

impl IntensityClient {
    /// Client for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// Configured endpoint
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current reading
    pub fn fetch(&self) -> Result<IntensityReading, IntensityError> {
        let response = self.agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => IntensityError::Status(code),
            ureq::Error::Transport(t) => IntensityError::Transport(t.to_string()),
        })?;

        let body: serde_json::Value = response
            .into_json()
            .map_err(|e| IntensityError::Decode(e.to_string()))?;
        IntensityReading::from_json(&body)
    }
}

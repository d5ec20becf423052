//! Server type definitions and request/response models

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sustainrec::data::parse_flag;
use sustainrec::recommend::{FeatureVector, Recommender, ScoredRecord};
use sustainrec::SustainError;

use super::intensity::IntensityClient;

/// GB national carbon intensity, current half hour
pub const DEFAULT_INTENSITY_URL: &str = "https://api.carbonintensity.org.uk/intensity";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Host to bind to
    pub host: String,
    /// Send permissive CORS headers
    pub cors: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Enable Prometheus metrics endpoint
    pub metrics: bool,
    /// Carbon-intensity endpoint
    pub intensity_url: String,
    /// Skip the carbon-intensity lookup entirely
    pub offline: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            cors: true,
            timeout_secs: 30,
            metrics: true,
            intensity_url: DEFAULT_INTENSITY_URL.to_string(),
            offline: false,
        }
    }
}

impl ServerConfig {
    /// Set the port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Toggle CORS
    #[must_use]
    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    /// Toggle the metrics endpoint
    #[must_use]
    pub fn with_metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the request timeout (minimum one second)
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs.max(1);
        self
    }

    /// Set the carbon-intensity endpoint
    #[must_use]
    pub fn with_intensity_url(mut self, url: impl Into<String>) -> Self {
        self.intensity_url = url.into();
        self
    }

    /// Toggle offline mode
    #[must_use]
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Server metrics (thread-safe)
#[derive(Debug)]
pub struct ServerMetrics {
    /// Total requests received
    pub requests_total: AtomicU64,
    /// Successful requests (2xx)
    pub requests_success: AtomicU64,
    /// Client errors (4xx)
    pub requests_client_error: AtomicU64,
    /// Server errors (5xx)
    pub requests_server_error: AtomicU64,
    /// Records returned across all recommendation responses
    pub recommendations_served: AtomicU64,
    /// Failed carbon-intensity lookups
    pub intensity_failures: AtomicU64,
    start_time: Instant,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerMetrics {
    /// Create new metrics with server start time
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            requests_success: AtomicU64::new(0),
            requests_client_error: AtomicU64::new(0),
            requests_server_error: AtomicU64::new(0),
            recommendations_served: AtomicU64::new(0),
            intensity_failures: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a finished request by HTTP status code
    pub fn record_status(&self, status: u16) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        let bucket = match status {
            200..=399 => &self.requests_success,
            400..=499 => &self.requests_client_error,
            _ => &self.requests_server_error,
        };
        bucket.fetch_add(1, Ordering::Relaxed);
    }

    /// Count records handed out by a recommendation endpoint
    pub fn record_recommendations(&self, count: usize) {
        self.recommendations_served
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Count a failed upstream lookup
    pub fn record_intensity_failure(&self) {
        self.intensity_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get Prometheus-format metrics
    pub fn prometheus_output(&self) -> String {
        let total = self.requests_total.load(Ordering::Relaxed);
        let success = self.requests_success.load(Ordering::Relaxed);
        let client_errors = self.requests_client_error.load(Ordering::Relaxed);
        let server_errors = self.requests_server_error.load(Ordering::Relaxed);
        let served = self.recommendations_served.load(Ordering::Relaxed);
        let intensity_failures = self.intensity_failures.load(Ordering::Relaxed);
        let uptime = self.uptime_seconds();

        format!(
            r#"# HELP sustainrec_requests_total Total number of HTTP requests
# TYPE sustainrec_requests_total counter
sustainrec_requests_total {total}

# HELP sustainrec_requests_success Successful requests (2xx)
# TYPE sustainrec_requests_success counter
sustainrec_requests_success {success}

# HELP sustainrec_requests_client_error Client error requests (4xx)
# TYPE sustainrec_requests_client_error counter
sustainrec_requests_client_error {client_errors}

# HELP sustainrec_requests_server_error Server error requests (5xx)
# TYPE sustainrec_requests_server_error counter
sustainrec_requests_server_error {server_errors}

# HELP sustainrec_recommendations_served_total Records returned by recommendation endpoints
# TYPE sustainrec_recommendations_served_total counter
sustainrec_recommendations_served_total {served}

# HELP sustainrec_intensity_failures_total Failed carbon-intensity lookups
# TYPE sustainrec_intensity_failures_total counter
sustainrec_intensity_failures_total {intensity_failures}

# HELP sustainrec_uptime_seconds Server uptime in seconds
# TYPE sustainrec_uptime_seconds gauge
sustainrec_uptime_seconds {uptime}
"#
        )
    }
}

/// Shared, read-only server state
#[derive(Debug)]
pub struct ServerState {
    /// Dataset, text index and ranking config
    pub recommender: Recommender,
    /// Server configuration
    pub config: ServerConfig,
    /// Metrics
    pub metrics: ServerMetrics,
    /// Carbon-intensity client
    pub intensity: IntensityClient,
}

impl ServerState {
    /// Create new server state
    pub fn new(recommender: Recommender, config: ServerConfig) -> Self {
        let intensity = IntensityClient::new(config.intensity_url.clone(), config.timeout());
        Self {
            recommender,
            config,
            metrics: ServerMetrics::new(),
            intensity,
        }
    }

    /// Health snapshot
    pub fn health(&self) -> HealthResponse {
        let records = self.recommender.table().len();
        HealthResponse {
            status: if records == 0 {
                HealthStatus::Degraded
            } else {
                HealthStatus::Healthy
            },
            records,
            index_ready: self.recommender.index().is_some(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.metrics.uptime_seconds(),
            requests_total: self.metrics.requests_total.load(Ordering::Relaxed),
        }
    }
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Dataset loaded
    Healthy,
    /// Dataset empty; every query answers with an empty list
    Degraded,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: HealthStatus,
    /// Rows in the dataset
    pub records: usize,
    /// Whether the text index was built
    pub index_ready: bool,
    /// Server version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Total requests processed
    pub requests_total: u64,
}

/// Liveness message for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Message text
    pub message: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type
    pub error: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Query string of `GET /recommend`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendParams {
    /// Material name or substring
    pub material_type: Option<String>,
    /// Required recyclable flag
    pub recyclable: Option<String>,
    /// Required compostable flag
    pub compostable: Option<String>,
}

/// Query string of `GET /alternatives`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlternativesParams {
    /// Exact material name
    pub material: Option<String>,
}

/// A boolean sent as `true`, `1` or `"yes"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// JSON boolean
    Bool(bool),
    /// JSON number, must be 0 or 1
    Number(f64),
    /// JSON string, parsed like a query flag
    Text(String),
}

impl FlagValue {
    /// Resolve to a boolean
    pub fn to_bool(&self, field: &str) -> Result<bool, SustainError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Number(n) if *n == 0.0 => Ok(false),
            Self::Number(n) if *n == 1.0 => Ok(true),
            Self::Number(n) => Err(SustainError::validation(
                field,
                format!("expected 0 or 1, got {n}"),
            )),
            Self::Text(s) => parse_flag(s).ok_or_else(|| {
                SustainError::validation(field, format!("expected a boolean, got '{s}'"))
            }),
        }
    }
}

/// Body of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecommendationRequest {
    /// Label echoed back as `query`
    pub material: String,
    /// kg CO2e per kg
    pub carbon_footprint: f64,
    /// Recyclable flag
    pub recyclable: FlagValue,
    /// Litres per kg
    pub water_usage: f64,
    /// Relative cost
    pub cost: f64,
}

impl FeatureRecommendationRequest {
    /// Validated feature vector; `material` must not be blank
    pub fn features(&self) -> Result<FeatureVector, SustainError> {
        if self.material.trim().is_empty() {
            return Err(SustainError::validation("material", "required"));
        }
        let features = FeatureVector::new(
            self.carbon_footprint,
            self.recyclable.to_bool("recyclable")?,
            self.water_usage,
            self.cost,
        );
        features.validate()?;
        Ok(features)
    }
}

/// Response of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecommendationResponse {
    /// The request's material label
    pub query: String,
    /// Best matches, most similar first
    pub recommendations: Vec<ScoredRecord>,
}

/// Body of `POST /calculate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// km driven
    pub distance: f64,
    /// kWh consumed
    pub electricity: f64,
    /// Diet label
    pub food: String,
}

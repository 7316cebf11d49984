//! HTTP status injection.
//!
//! [`ServerSimulator`] answers each request with a status from a fixed table,
//! picking an error status at the configured rate, and keeps the most recent
//! answers in a bounded log.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tokio::time::sleep;
use uuid::Uuid;

use crate::error::MockError;
use crate::network::{clamp_probability, make_rng};

/// Entries kept in the server log.
pub const SERVER_LOG_CAPACITY: usize = 100;

/// Upper bound of the random delay added to each request.
const LATENCY_JITTER_MS: u64 = 200;

/// Upper bound of the random amount added to the logged duration.
const DURATION_JITTER_MS: u64 = 100;

/// Which family a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Success,
    Client,
    Server,
}

/// An HTTP status the simulator can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HttpStatus {
    pub code: u16,
    pub message: &'static str,
    pub description: &'static str,
    pub class: StatusClass,
}

impl HttpStatus {
    const fn new(
        code: u16,
        message: &'static str,
        description: &'static str,
        class: StatusClass,
    ) -> Self {
        Self {
            code,
            message,
            description,
            class,
        }
    }

    /// Looks a status up by code.
    pub fn from_code(code: u16) -> Option<Self> {
        HTTP_STATUSES.iter().find(|s| s.code == code).copied()
    }

    /// Returns `true` for 4xx and 5xx statuses.
    pub fn is_error(&self) -> bool {
        self.class != StatusClass::Success
    }
}

/// Every status the simulator answers with.
pub const HTTP_STATUSES: [HttpStatus; 18] = [
    HttpStatus::new(200, "OK", "Request successful", StatusClass::Success),
    HttpStatus::new(201, "Created", "Resource created successfully", StatusClass::Success),
    HttpStatus::new(
        204,
        "No Content",
        "Request successful, no content returned",
        StatusClass::Success,
    ),
    HttpStatus::new(400, "Bad Request", "Invalid request syntax", StatusClass::Client),
    HttpStatus::new(401, "Unauthorized", "Authentication required", StatusClass::Client),
    HttpStatus::new(403, "Forbidden", "Access denied", StatusClass::Client),
    HttpStatus::new(404, "Not Found", "Resource not found", StatusClass::Client),
    HttpStatus::new(
        405,
        "Method Not Allowed",
        "HTTP method not supported",
        StatusClass::Client,
    ),
    HttpStatus::new(
        408,
        "Request Timeout",
        "Server timed out waiting for request",
        StatusClass::Client,
    ),
    HttpStatus::new(
        409,
        "Conflict",
        "Request conflicts with current state",
        StatusClass::Client,
    ),
    HttpStatus::new(422, "Unprocessable Entity", "Validation failed", StatusClass::Client),
    HttpStatus::new(429, "Too Many Requests", "Rate limit exceeded", StatusClass::Client),
    HttpStatus::new(
        500,
        "Internal Server Error",
        "Unexpected server error",
        StatusClass::Server,
    ),
    HttpStatus::new(501, "Not Implemented", "Feature not implemented", StatusClass::Server),
    HttpStatus::new(
        502,
        "Bad Gateway",
        "Invalid response from upstream server",
        StatusClass::Server,
    ),
    HttpStatus::new(
        503,
        "Service Unavailable",
        "Server temporarily unavailable",
        StatusClass::Server,
    ),
    HttpStatus::new(504, "Gateway Timeout", "Gateway timed out", StatusClass::Server),
    HttpStatus::new(
        507,
        "Insufficient Storage",
        "Server storage exceeded",
        StatusClass::Server,
    ),
];

/// Settings for a [`ServerSimulator`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Chance in `[0, 1]` of answering with an error status.
    pub error_rate: f64,
    /// Base delay before every answer.
    pub latency: Duration,
    /// Add up to 200 ms of random delay to each answer.
    pub jitter: bool,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            error_rate: 0.0,
            latency: Duration::from_millis(100),
            jitter: true,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Sets the error rate, clamped to `[0, 1]`.
    pub fn error_rate(mut self, rate: f64) -> Self {
        self.error_rate = clamp_probability(rate);
        self
    }

    /// Sets the base latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Enables or disables random extra delay.
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Sets the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How loaded a resource reading is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricLevel {
    /// Below 50%.
    Normal,
    /// 50% up to 80%.
    Elevated,
    /// 80% and above.
    Critical,
}

impl MetricLevel {
    /// Classifies a percentage.
    pub fn of(percent: f64) -> Self {
        if percent < 50.0 {
            Self::Normal
        } else if percent < 80.0 {
            Self::Elevated
        } else {
            Self::Critical
        }
    }
}

/// Simulated resource readings. Percentages are in `[0, 100)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetrics {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
    pub active_connections: u32,
    /// Number of readings taken so far.
    pub uptime: u64,
    pub requests_per_second: u32,
    /// Configured error rate as a percentage.
    pub error_rate: f64,
}

/// One answered request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub status: HttpStatus,
    pub endpoint: String,
    pub duration: Duration,
}

struct ServerState {
    config: ServerConfig,
    rng: StdRng,
    log: VecDeque<ServerLogEntry>,
    metrics: ServerMetrics,
}

/// Answers requests with random HTTP statuses.
pub struct ServerSimulator {
    state: Mutex<ServerState>,
}

impl std::fmt::Debug for ServerSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSimulator")
            .field("config", &self.config())
            .finish_non_exhaustive()
    }
}

impl Default for ServerSimulator {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

impl ServerSimulator {
    /// Creates a simulator from `config`.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            state: Mutex::new(ServerState {
                rng: make_rng(config.seed),
                metrics: ServerMetrics {
                    error_rate: config.error_rate * 100.0,
                    ..ServerMetrics::default()
                },
                config,
                log: VecDeque::with_capacity(SERVER_LOG_CAPACITY),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current settings.
    pub fn config(&self) -> ServerConfig {
        self.lock().config.clone()
    }

    /// Sets the error rate, clamped to `[0, 1]`.
    pub fn set_error_rate(&self, rate: f64) {
        let mut state = self.lock();
        state.config.error_rate = clamp_probability(rate);
        state.metrics.error_rate = state.config.error_rate * 100.0;
    }

    /// Sets the base latency.
    pub fn set_latency(&self, latency: Duration) {
        self.lock().config.latency = latency;
    }

    /// Pick a status and the delay before answering with it.
    fn draw(&self) -> (HttpStatus, Duration, Duration) {
        let mut state = self.lock();
        let ServerState { config, rng, .. } = &mut *state;

        let is_error = rng.random_bool(config.error_rate);
        let candidates: Vec<HttpStatus> = HTTP_STATUSES
            .iter()
            .filter(|s| s.is_error() == is_error)
            .copied()
            .collect();
        let status = pick(&candidates, rng);

        let (delay, logged) = if config.jitter {
            (
                config.latency + Duration::from_millis(rng.random_range(0..LATENCY_JITTER_MS)),
                config.latency + Duration::from_millis(rng.random_range(0..DURATION_JITTER_MS)),
            )
        } else {
            (config.latency, config.latency)
        };
        (status, delay, logged)
    }

    /// Answer a request to `endpoint`.
    ///
    /// Error statuses come back as [`MockError::Server`].
    pub async fn make_request(&self, endpoint: &str) -> Result<HttpStatus, MockError> {
        let (status, delay, logged) = self.draw();
        if !delay.is_zero() {
            sleep(delay).await;
        }

        {
            let mut state = self.lock();
            state.log.push_front(ServerLogEntry {
                id: format!("log-{}", Uuid::new_v4().simple()),
                timestamp: Utc::now(),
                status,
                endpoint: endpoint.to_string(),
                duration: logged,
            });
            state.log.truncate(SERVER_LOG_CAPACITY);
        }

        if status.is_error() {
            warn!("server: {} -> {} {}", endpoint, status.code, status.message);
            Err(MockError::Server(status))
        } else {
            debug!("server: {} -> {} {}", endpoint, status.code, status.message);
            Ok(status)
        }
    }

    /// Logged answers, newest first.
    pub fn logs(&self) -> Vec<ServerLogEntry> {
        self.lock().log.iter().cloned().collect()
    }

    /// Latest resource readings.
    pub fn metrics(&self) -> ServerMetrics {
        self.lock().metrics
    }

    /// Take a fresh set of readings and advance the uptime by one.
    pub fn tick(&self) -> ServerMetrics {
        let mut state = self.lock();
        let ServerState { rng, metrics, .. } = &mut *state;
        metrics.cpu = rng.random_range(0.0..100.0);
        metrics.memory = rng.random_range(0.0..100.0);
        metrics.disk = rng.random_range(0.0..100.0);
        metrics.network = rng.random_range(0.0..100.0);
        metrics.active_connections = rng.random_range(0..1000);
        metrics.requests_per_second = rng.random_range(0..500);
        metrics.uptime += 1;
        *metrics
    }

    /// Drops every log entry.
    pub fn clear_logs(&self) {
        self.lock().log.clear();
    }
}

fn pick(candidates: &[HttpStatus], rng: &mut StdRng) -> HttpStatus {
    candidates.choose(rng).copied().unwrap_or(HTTP_STATUSES[0])
}

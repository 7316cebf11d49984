//! Network failure injection.
//!
//! [`NetworkSimulator`] stands in for the transport: it waits the configured
//! latency and then either succeeds, times out or fails with one of the
//! [`NetworkFault`]s. It is an ordinary value passed to whoever needs it.
//! [`RequestLog`] records what happened to each simulated request.

use std::fmt;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::time::{Instant, sleep};
use uuid::Uuid;

use crate::error::MockError;

/// Endpoints hit by [`NetworkSimulator::run_batch`] callers by default.
pub const BATCH_ENDPOINTS: [&str; 8] = [
    "/api/users",
    "/api/posts",
    "/api/comments",
    "/api/notifications",
    "/api/analytics",
    "/api/search",
    "/api/upload",
    "/api/export",
];

// =============================================================================
// Faults
// =============================================================================

/// A transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NetworkFault {
    NetworkError,
    ConnectionRefused,
    DnsResolutionFailed,
    TlsError,
    ServerUnavailable,
    ConnectionReset,
    ProxyError,
    GatewayTimeout,
}

impl NetworkFault {
    /// Every fault, in the order they are drawn from.
    pub const ALL: [NetworkFault; 8] = [
        Self::NetworkError,
        Self::ConnectionRefused,
        Self::DnsResolutionFailed,
        Self::TlsError,
        Self::ServerUnavailable,
        Self::ConnectionReset,
        Self::ProxyError,
        Self::GatewayTimeout,
    ];

    /// Short name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NetworkError => "Network Error",
            Self::ConnectionRefused => "Connection Refused",
            Self::DnsResolutionFailed => "DNS Resolution Failed",
            Self::TlsError => "SSL/TLS Error",
            Self::ServerUnavailable => "Server Unavailable",
            Self::ConnectionReset => "Connection Reset",
            Self::ProxyError => "Proxy Error",
            Self::GatewayTimeout => "Gateway Timeout",
        }
    }

    /// Detail message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NetworkError => "Failed to fetch: Network request failed",
            Self::ConnectionRefused => "Connection refused: Unable to connect to server",
            Self::DnsResolutionFailed => "DNS resolution failed: Unable to resolve hostname",
            Self::TlsError => "SSL handshake failed: Certificate verification failed",
            Self::ServerUnavailable => "Service unavailable: Server is currently down",
            Self::ConnectionReset => "Connection reset: The server closed the connection",
            Self::ProxyError => "Proxy error: Unable to connect through proxy server",
            Self::GatewayTimeout => "Gateway timeout: API gateway timed out",
        }
    }
}

impl fmt::Display for NetworkFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.message())
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Settings for a [`NetworkSimulator`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use testhub_mock::SimulatorConfig;
///
/// let config = SimulatorConfig::default()
///     .latency(Duration::from_millis(250))
///     .error_probability(0.3)
///     .seed(7);
///
/// assert_eq!(config.error_probability, 0.3);
/// assert_eq!(SimulatorConfig::default().error_probability(4.0).error_probability, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulatorConfig {
    /// Delay before every response.
    pub latency: Duration,
    /// Requests whose latency reaches this fail with a timeout. Zero disables.
    pub timeout: Duration,
    /// Chance in `[0, 1]` that a request fails with a fault.
    pub error_probability: f64,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    /// Sets the latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the failure chance, clamped to `[0, 1]`.
    pub fn error_probability(mut self, probability: f64) -> Self {
        self.error_probability = clamp_probability(probability);
        self
    }

    /// Sets the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

pub(crate) fn clamp_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

// =============================================================================
// Simulator
// =============================================================================

/// Payload of a simulated success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedResponse {
    pub endpoint: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Injects latency, timeouts and transport faults.
#[derive(Debug)]
pub struct NetworkSimulator {
    settings: RwLock<SimulatorConfig>,
    rng: Mutex<StdRng>,
}

impl Default for NetworkSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl NetworkSimulator {
    /// Creates a simulator from `config`.
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = make_rng(config.seed);
        Self {
            settings: RwLock::new(config),
            rng: Mutex::new(rng),
        }
    }

    /// Current settings.
    pub fn config(&self) -> SimulatorConfig {
        self.settings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn configure(&self, f: impl FnOnce(&mut SimulatorConfig)) {
        let mut settings = self.settings.write().unwrap_or_else(|e| e.into_inner());
        f(&mut settings);
    }

    /// Sets the failure chance, clamped to `[0, 1]`.
    pub fn set_error_probability(&self, probability: f64) {
        self.configure(|c| c.error_probability = clamp_probability(probability));
    }

    /// Sets the latency.
    pub fn set_latency(&self, latency: Duration) {
        self.configure(|c| c.latency = latency);
    }

    /// Sets the timeout. Zero disables it.
    pub fn set_timeout(&self, timeout: Duration) {
        self.configure(|c| c.timeout = timeout);
    }

    /// Back to no latency, no timeout and no failures. The RNG is kept.
    pub fn reset(&self) {
        self.configure(|c| {
            c.latency = Duration::ZERO;
            c.timeout = Duration::ZERO;
            c.error_probability = 0.0;
        });
    }

    /// Pick the fault for the next request, if it fails.
    fn roll(&self, probability: f64) -> Option<NetworkFault> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        if !rng.random_bool(probability) {
            return None;
        }
        NetworkFault::ALL.choose(&mut *rng).copied()
    }

    /// Simulate one request to `endpoint`.
    ///
    /// With a non-zero timeout no longer than the latency, the request waits
    /// out the timeout and fails with [`MockError::Timeout`]. Otherwise it
    /// waits the latency and fails with a random fault at the configured
    /// probability.
    pub async fn simulate_request(&self, endpoint: &str) -> Result<SimulatedResponse, MockError> {
        let config = self.config();

        if !config.timeout.is_zero() && config.latency >= config.timeout {
            sleep(config.timeout).await;
            warn!("network: {} timed out after {:?}", endpoint, config.timeout);
            return Err(MockError::Timeout(config.timeout));
        }

        if !config.latency.is_zero() {
            sleep(config.latency).await;
        }

        if let Some(fault) = self.roll(config.error_probability) {
            warn!("network: {} failed: {}", endpoint, fault);
            return Err(MockError::Network(fault));
        }

        debug!("network: {} ok", endpoint);
        Ok(SimulatedResponse {
            endpoint: endpoint.to_string(),
            timestamp: Utc::now(),
            message: "Request completed successfully".to_string(),
        })
    }

    /// Fire a request at every endpoint concurrently and record each one.
    pub async fn run_batch(&self, endpoints: &[&str], log: &mut RequestLog) {
        let outcomes = join_all(endpoints.iter().map(|endpoint| async move {
            let started = Instant::now();
            let result = self.simulate_request(endpoint).await;
            (*endpoint, result, started.elapsed())
        }))
        .await;

        for (endpoint, result, duration) in outcomes {
            log.record(endpoint, &result.map(|_| ()), duration);
        }
    }
}

// =============================================================================
// Request log
// =============================================================================

/// What happened to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOutcome {
    Success,
    Error(String),
}

impl RequestOutcome {
    /// Returns `true` for [`RequestOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// One logged request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestStatus {
    pub id: String,
    pub endpoint: String,
    pub outcome: RequestOutcome,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
}

/// Totals over a [`RequestLog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub average_duration: Duration,
}

/// Record of simulated requests, oldest first.
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    entries: Vec<RequestStatus>,
}

impl RequestLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the outcome of a request and returns its entry.
    pub fn record<T>(
        &mut self,
        endpoint: &str,
        result: &Result<T, MockError>,
        duration: Duration,
    ) -> &RequestStatus {
        let outcome = match result {
            Ok(_) => RequestOutcome::Success,
            Err(e) => RequestOutcome::Error(e.to_string()),
        };
        self.entries.push(RequestStatus {
            id: format!("req-{}", Uuid::new_v4().simple()),
            endpoint: endpoint.to_string(),
            outcome,
            duration,
            timestamp: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Logged requests, oldest first.
    pub fn entries(&self) -> &[RequestStatus] {
        &self.entries
    }

    /// Number of logged requests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Success and failure counts and the mean duration.
    pub fn stats(&self) -> RequestStats {
        let total = self.entries.len();
        let success = self
            .entries
            .iter()
            .filter(|e| e.outcome.is_success())
            .count();
        let average_duration = match u32::try_from(total) {
            Ok(n) if n > 0 => self.entries.iter().map(|e| e.duration).sum::<Duration>() / n,
            _ => Duration::ZERO,
        };
        RequestStats {
            total,
            success,
            failed: total - success,
            average_duration,
        }
    }
}

//! Generic CRUD service over a [`MockStore`].
//!
//! Every call makes the same simulated round trip before touching the store:
//! sleep the configured latency, pass through the network simulator, then the
//! server simulator. Either simulator may fail the call.
//!
//! # Example
//!
//! ```no_run
//! use testhub_mock::{CrudService, ServiceConfig, UserStore};
//!
//! # async fn run() -> Result<(), testhub_mock::MockError> {
//! let users = CrudService::new("Users", UserStore::seeded(), ServiceConfig::default());
//!
//! let page = users.get_all(1, 10).await?;
//! println!("{:?}: {} users", page.message, page.data.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::time::sleep;

use crate::error::MockError;
use crate::model::LikeToggle;
use crate::network::NetworkSimulator;
use crate::query::PostStats;
use crate::response::{ApiResponse, CursorPage, Metadata};
use crate::server::ServerSimulator;
use crate::store::{MockStore, PostStore};

/// Default delay before each response.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Configuration for a [`CrudService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Delay before each response.
    ///
    /// Default: 500 ms
    pub latency: Duration,

    /// Network failures to inject, if any.
    pub simulator: Option<Arc<NetworkSimulator>>,

    /// Server statuses to inject, if any.
    pub server: Option<Arc<ServerSimulator>>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            simulator: None,
            server: None,
        }
    }
}

impl ServiceConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Routes calls through a network simulator.
    pub fn with_simulator(mut self, simulator: Arc<NetworkSimulator>) -> Self {
        self.simulator = Some(simulator);
        self
    }

    /// Routes calls through a server simulator.
    pub fn with_server(mut self, server: Arc<ServerSimulator>) -> Self {
        self.server = Some(server);
        self
    }
}

/// CRUD endpoint backed by an in-memory store.
#[derive(Debug)]
pub struct CrudService<S> {
    endpoint: String,
    store: S,
    config: ServiceConfig,
}

impl<S: MockStore> CrudService<S> {
    /// Creates a service named `endpoint` (e.g. `Users`) over `store`.
    pub fn new(endpoint: impl Into<String>, store: S, config: ServiceConfig) -> Self {
        Self {
            endpoint: endpoint.into(),
            store,
            config,
        }
    }

    /// Endpoint name.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn round_trip(&self) -> Result<(), MockError> {
        if !self.config.latency.is_zero() {
            sleep(self.config.latency).await;
        }
        if let Some(simulator) = &self.config.simulator {
            simulator.simulate_request(&self.endpoint).await?;
        }
        if let Some(server) = &self.config.server {
            server.make_request(&self.endpoint).await?;
        }
        Ok(())
    }

    fn message(&self, action: &str) -> String {
        format!("{} {} successfully", self.endpoint, action)
    }

    fn not_found(&self, id: &str) -> MockError {
        MockError::not_found(&self.endpoint, id)
    }

    /// One page of every record.
    pub async fn get_all(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<ApiResponse<Vec<S::Item>>, MockError> {
        self.get_all_with(page, limit, |items| items).await
    }

    /// One page of the records after `select` has filtered or reordered them.
    /// Metadata counts the selected records.
    pub async fn get_all_with<F>(
        &self,
        page: usize,
        limit: usize,
        select: F,
    ) -> Result<ApiResponse<Vec<S::Item>>, MockError>
    where
        F: FnOnce(Vec<S::Item>) -> Vec<S::Item> + Send,
    {
        if page == 0 || limit == 0 {
            return Err(MockError::InvalidPagination { page, limit });
        }
        self.round_trip().await?;

        let items = select(self.store.get_all().await);
        let total = items.len();
        let data: Vec<S::Item> = items
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        debug!(
            "{}: page {} ({} of {} records)",
            self.endpoint,
            page,
            data.len(),
            total
        );
        Ok(ApiResponse::new(self.message("retrieved"), data)
            .with_metadata(Metadata::new(total, page, limit)))
    }

    /// Up to `limit` records starting at `cursor`, for feeds that load more
    /// as the reader scrolls. No cursor starts at the first record.
    ///
    /// The cursor is the record offset as a decimal string.
    pub async fn get_infinite(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<ApiResponse<CursorPage<S::Item>>, MockError> {
        let start = match cursor {
            None => 0,
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| MockError::InvalidCursor(raw.to_string()))?,
        };
        if limit == 0 {
            return Err(MockError::InvalidPagination { page: 1, limit });
        }
        self.round_trip().await?;

        let items = self.store.get_all().await;
        let total = items.len();
        let end = start.saturating_add(limit).min(total);
        let slice: Vec<S::Item> = items.into_iter().skip(start).take(limit).collect();

        debug!(
            "{}: feed from {} ({} of {} records)",
            self.endpoint,
            start,
            slice.len(),
            total
        );
        let mut page = CursorPage::new(slice);
        if end < total {
            page = page.with_next_cursor(end.to_string());
        }
        Ok(ApiResponse::new(self.message("retrieved"), page))
    }

    /// The record with this id.
    pub async fn get_by_id(&self, id: &str) -> Result<ApiResponse<S::Item>, MockError> {
        self.round_trip().await?;
        let item = self
            .store
            .get_by_id(id)
            .await
            .ok_or_else(|| self.not_found(id))?;
        Ok(ApiResponse::new(self.message("retrieved"), item))
    }

    /// Create a record.
    pub async fn create(&self, input: S::Create) -> Result<ApiResponse<S::Item>, MockError> {
        self.round_trip().await?;
        let item = self.store.create(input).await;
        info!("{}: created", self.endpoint);
        Ok(ApiResponse::new(self.message("created"), item))
    }

    /// Update the record with this id.
    pub async fn update(
        &self,
        id: &str,
        input: S::Update,
    ) -> Result<ApiResponse<S::Item>, MockError> {
        self.round_trip().await?;
        let item = self
            .store
            .update(id, input)
            .await
            .ok_or_else(|| self.not_found(id))?;
        info!("{}: updated {}", self.endpoint, id);
        Ok(ApiResponse::new(self.message("updated"), item))
    }

    /// Delete the record with this id.
    pub async fn delete_by_id(&self, id: &str) -> Result<ApiResponse<()>, MockError> {
        self.round_trip().await?;
        if !self.store.delete(id).await {
            return Err(self.not_found(id));
        }
        info!("{}: deleted {}", self.endpoint, id);
        Ok(ApiResponse::new(self.message("deleted"), ()))
    }
}

impl CrudService<PostStore> {
    /// Toggle the current user's like on a post.
    pub async fn toggle_like(&self, id: &str) -> Result<ApiResponse<LikeToggle>, MockError> {
        self.round_trip().await?;
        let toggle = self
            .store
            .toggle_like(id)
            .await
            .ok_or_else(|| self.not_found(id))?;
        let message = if toggle.liked {
            "Post liked"
        } else {
            "Post unliked"
        };
        info!("{}: {} {}", self.endpoint, message.to_lowercase(), id);
        Ok(ApiResponse::new(message, toggle))
    }

    /// Aggregate counts over every post.
    pub async fn stats(&self) -> Result<ApiResponse<PostStats>, MockError> {
        self.round_trip().await?;
        let stats = self.store.stats().await;
        Ok(ApiResponse::new("Statistics retrieved successfully", stats))
    }
}

//! HTTP client construction.
//!
//! Every dispatched request and every download obtains its `reqwest::Client`
//! through [`ClientFactory`]. By default a fresh client is built per call; a
//! [`ClientPool`] can be opted into to reuse one client per connect timeout.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use reqwest::Client;
use tracing::debug;

/// Builds a client whose connect timeout bounds connection establishment only.
///
/// No overall request timeout is configured: once connected, a slow server can
/// hold the call past `connect_timeout`. Keep-alive stays enabled so the
/// client's pool can reuse connections.
///
/// # Errors
///
/// Returns the underlying `reqwest::Error` if the TLS backend or resolver
/// cannot be initialized.
pub fn build_client(connect_timeout: Duration) -> Result<Client, reqwest::Error> {
    debug!(connect_timeout_ms = connect_timeout.as_millis(), "building HTTP client");
    Client::builder()
        .connect_timeout(connect_timeout)
        .gzip(true)
        .build()
}

/// Clients cached by connect timeout.
///
/// Cloning the pool shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct ClientPool {
    clients: Arc<DashMap<Duration, Client>>,
}

impl ClientPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached client for `connect_timeout`, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns the builder error when no client exists yet and construction fails.
    pub fn get_or_build(&self, connect_timeout: Duration) -> Result<Client, reqwest::Error> {
        if let Some(client) = self.clients.get(&connect_timeout) {
            return Ok(client.value().clone());
        }
        let client = build_client(connect_timeout)?;
        Ok(self
            .clients
            .entry(connect_timeout)
            .or_insert(client)
            .value()
            .clone())
    }

    /// Number of distinct connect timeouts with a cached client.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns true when no client has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// Strategy for obtaining a client for one call.
#[derive(Debug, Clone, Default)]
pub enum ClientFactory {
    /// Build a new client for every call.
    #[default]
    Fresh,
    /// Reuse clients from a shared pool keyed by connect timeout.
    Pooled(ClientPool),
}

impl ClientFactory {
    /// Creates a pooled factory with an empty pool.
    #[must_use]
    pub fn pooled() -> Self {
        Self::Pooled(ClientPool::new())
    }

    /// Obtains a client configured with `connect_timeout`.
    ///
    /// # Errors
    ///
    /// Returns the builder error if a client has to be built and construction fails.
    pub fn client(&self, connect_timeout: Duration) -> Result<Client, reqwest::Error> {
        match self {
            Self::Fresh => build_client(connect_timeout),
            Self::Pooled(pool) => pool.get_or_build(connect_timeout),
        }
    }
}

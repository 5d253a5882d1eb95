//! Shared `bb8` pool of `diesel-async` PostgreSQL connections.
//!
//! Every repository adapter clones one [`DbPool`]. A checkout that outlives
//! the configured timeout becomes [`PoolError::Checkout`], which the adapters
//! map to their `Connection` variant and the API reports as
//! `503 service_unavailable`.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::debug;

/// Pool construction or checkout failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available in time.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not open its initial connections.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Checkout failure with `message`.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Build failure with `message`.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Connection pool sizing and timeouts.
///
/// The idle floor never exceeds the pool size, whichever order the builder
/// methods run in.
///
/// ```
/// use std::time::Duration;
/// use peerbridge::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://peerbridge@localhost/peerbridge")
///     .with_min_idle(Some(8))
///     .with_max_size(3)
///     .with_checkout_timeout(Duration::from_secs(5));
/// assert_eq!(config.min_idle(), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Ten connections, two kept idle, thirty second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            checkout_timeout: Duration::from_secs(30),
        }
    }

    /// Cap the number of open connections; zero is raised to one.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Keep this many idle connections, or none.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Bound how long a request waits for a connection.
    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// Connection URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Connection cap.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Idle floor clamped to the pool size.
    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle.map(|idle| idle.min(self.max_size))
    }

    /// Checkout wait bound.
    pub fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }
}

/// Shared PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Open the pool described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the URL is malformed or the initial
    /// idle connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let pool = Pool::builder()
            .max_size(config.max_size())
            .min_idle(config.min_idle())
            .connection_timeout(config.checkout_timeout())
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        debug!(
            max_size = config.max_size(),
            min_idle = ?config.min_idle(),
            "database pool ready"
        );
        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection frees up within the
    /// checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_suit_a_small_deployment() {
        let config = PoolConfig::new("postgres://localhost/peerbridge");

        assert_eq!(config.database_url(), "postgres://localhost/peerbridge");
        assert_eq!(config.max_size(), 10);
        assert_eq!(config.min_idle(), Some(2));
        assert_eq!(config.checkout_timeout(), Duration::from_secs(30));
    }

    #[rstest]
    #[case(0, Some(2), 1, Some(1))]
    #[case(4, Some(9), 4, Some(4))]
    #[case(32, None, 32, None)]
    fn idle_floor_never_exceeds_the_pool(
        #[case] max_size: u32,
        #[case] min_idle: Option<u32>,
        #[case] expected_size: u32,
        #[case] expected_idle: Option<u32>,
    ) {
        let config = PoolConfig::new("postgres://localhost/peerbridge")
            .with_min_idle(min_idle)
            .with_max_size(max_size);

        assert_eq!(config.max_size(), expected_size);
        assert_eq!(config.min_idle(), expected_idle);
    }

    #[rstest]
    #[actix_rt::test]
    async fn malformed_urls_fail_to_build() {
        let config = PoolConfig::new("not a url")
            .with_min_idle(Some(1))
            .with_checkout_timeout(Duration::from_millis(200));

        let err = DbPool::new(config).await.err().expect("build should fail");
        assert!(matches!(err, PoolError::Build { .. }));
    }
}

//! Async connection pool for the PostgreSQL adapters.
//!
//! Wraps `diesel-async` with `bb8`. Checkout is non-blocking and bounded by
//! the configured timeout.

use std::fmt;
use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use zeroize::Zeroizing;

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and connection settings.
///
/// Defaults: at most 10 connections, 2 kept idle, 30 second checkout
/// timeout.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use mentorship::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/mentorship")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Clone)]
pub struct PoolConfig {
    database_url: Zeroizing<String>,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Zeroizing::new(database_url.into()),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Upper bound on open connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolConfig")
            .field("database_url", &"<redacted>")
            .field("max_size", &self.max_size)
            .field("min_idle", &self.min_idle)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

/// Pooled `AsyncPgConnection`s shared by the Diesel repositories.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the initial connections cannot be
    /// established.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url.as_str());

        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection frees up before the
    /// timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_apply_until_overridden() {
        let config = PoolConfig::new("postgres://localhost/mentorship");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.min_idle, Some(2));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));

        let tuned = config
            .with_min_idle(None)
            .with_connection_timeout(Duration::from_secs(3));
        assert_eq!(tuned.min_idle, None);
        assert_eq!(tuned.connection_timeout, Duration::from_secs(3));
    }

    #[rstest]
    fn errors_carry_their_cause() {
        assert!(PoolError::checkout("timed out").to_string().contains("timed out"));
        assert!(PoolError::build("bad url").to_string().contains("bad url"));
    }
}

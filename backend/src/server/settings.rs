//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PEERBRIDGE_*` environment variables and an
//! optional configuration file. Optional fields fall back to the defaults
//! below through accessor methods.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use peerbridge::domain::{OrphanPolicy, StudentId};
use peerbridge::inbound::http::session_config::SessionToggles;
use peerbridge::outbound::persistence::PoolConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_CHECKOUT_SECS: u64 = 30;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_ADMIN_STUDENT_ID: i32 = 1;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The administrator id is not a positive integer.
    #[error("admin student id must be positive, got {0}")]
    AdminStudentId(i32),
    /// The orphan policy name is unknown.
    #[error(transparent)]
    OrphanPolicy(#[from] peerbridge::domain::aggregation::OrphanPolicyParseError),
}

/// Configuration values for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PEERBRIDGE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; fixture ports serve requests when absent.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub db_pool_size: Option<u32>,
    /// Idle connections kept open; `0` lets the pool drain completely.
    pub db_min_idle: Option<u32>,
    /// Seconds a request waits for a pooled connection.
    pub db_checkout_timeout_secs: Option<u64>,
    /// File holding the shared session cookie key.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: Option<bool>,
    /// Student allowed to curate resources.
    pub admin_student_id: Option<i32>,
    /// `fail` or `skip` for rows whose author no longer exists.
    pub orphan_policy: Option<String>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the pool size, falling back to 10.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE).max(1)
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        let min_idle = match self.db_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE) {
            0 => None,
            idle => Some(idle),
        };
        let checkout = self
            .db_checkout_timeout_secs
            .unwrap_or(DEFAULT_POOL_CHECKOUT_SECS)
            .max(1);
        PoolConfig::new(database_url)
            .with_max_size(self.db_pool_size())
            .with_min_idle(min_idle)
            .with_checkout_timeout(Duration::from_secs(checkout))
    }

    /// Return the administrator account.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::AdminStudentId`] for non-positive ids.
    pub fn admin_student_id(&self) -> Result<StudentId, SettingsError> {
        let raw = self.admin_student_id.unwrap_or(DEFAULT_ADMIN_STUDENT_ID);
        if raw < 1 {
            return Err(SettingsError::AdminStudentId(raw));
        }
        Ok(StudentId::new(raw))
    }

    /// Return the orphan policy, falling back to [`OrphanPolicy::FailListing`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::OrphanPolicy`] for unknown names.
    pub fn orphan_policy(&self) -> Result<OrphanPolicy, SettingsError> {
        match self.orphan_policy.as_deref() {
            Some(name) => Ok(name.parse()?),
            None => Ok(OrphanPolicy::default()),
        }
    }

    /// Whether migrations run on startup.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Session cookie toggles for [`session_settings`].
    ///
    /// [`session_settings`]: peerbridge::inbound::http::session_config::session_settings
    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self
                .session_key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE)),
            cookie_secure: self.cookie_secure.unwrap_or(true),
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}

//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use peerbridge::domain::{OrphanPolicy, StudentId};
use peerbridge::inbound::http::state::DEFAULT_ADMIN_STUDENT_ID;
use peerbridge::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin: StudentId,
    pub(crate) orphan_policy: OrphanPolicy,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and the bind
    /// address. Persistence is off until [`Self::with_db_pool`] is called.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            admin: DEFAULT_ADMIN_STUDENT_ID,
            orphan_policy: OrphanPolicy::default(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, the server uses the Diesel adapters for every port;
    /// otherwise fixture ports answer requests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Set the student allowed to curate resources.
    #[must_use]
    pub fn with_admin(mut self, admin: StudentId) -> Self {
        self.admin = admin;
        self
    }

    /// Set the handling of rows whose author no longer exists.
    #[must_use]
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }
}

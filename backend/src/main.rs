//! peerbridge server entry point: loads settings, prepares the store and
//! serves the REST and typed query surfaces.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use peerbridge::inbound::http::health::HealthState;
use peerbridge::inbound::http::session_config::{BuildMode, session_settings};
use peerbridge::outbound::persistence::{DbPool, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(error) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %error, "tracing init failed");
    }
}

async fn connect_store(settings: &AppSettings, database_url: &str) -> Result<DbPool> {
    if settings.run_migrations() {
        let applied = run_pending_migrations(database_url)
            .await
            .wrap_err("apply migrations")?;
        info!(applied, "migrations applied");
    }
    DbPool::new(settings.pool_config(database_url))
        .await
        .wrap_err("build database pool")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load().wrap_err("load settings")?;
    let session = session_settings(&settings.session_toggles(), BuildMode::from_debug_assertions())?;
    let bind_addr = settings.bind_addr()?;

    let base = ServerConfig::new(session.key, session.cookie_secure, session.same_site, bind_addr)
        .with_admin(settings.admin_student_id()?)
        .with_orphan_policy(settings.orphan_policy()?);
    let config = match settings.database_url.as_deref() {
        Some(url) => base.with_db_pool(connect_store(&settings, url).await?),
        None => {
            warn!("no database configured; serving fixture data");
            base
        }
    };

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    info!(%bind_addr, "peerbridge listening");
    server.await?;
    Ok(())
}

//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! Each context gets its own cluster and a freshly created, fully migrated
//! database. `PG_RUNTIME_DIR` and `PG_DATA_DIR` default to unique directories
//! under the target directory so bootstrap never writes outside the
//! workspace. Environment mutation is serialised through `env-lock`.
//!
//! The PostgreSQL binaries are downloaded on first use. When the cluster
//! cannot start, suites skip with a `SKIP-TEST-CLUSTER` marker unless
//! `REQUIRE_TEST_CLUSTER` is truthy, in which case setup failure panics.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use peerbridge::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const BOOTSTRAP_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

fn pg_embed_dir() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"))
        .join("pg-embed")
        .join(format!("peerbridge-{}-{}", std::process::id(), Uuid::new_v4()))
}

fn is_transient(error: &str) -> bool {
    let error = error.to_lowercase();
    ["connection reset", "timed out", "timeout", "temporarily unavailable", "dns error"]
        .iter()
        .any(|pattern| error.contains(pattern))
}

/// Start a cluster, retrying transient download failures.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_dirs =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_dirs {
        let base = pg_embed_dir();
        let runtime_dir = base.join("install");
        let data_dir = base.join("data");
        std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
        std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 1..=BOOTSTRAP_ATTEMPTS {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == BOOTSTRAP_ATTEMPTS || !is_transient(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS << attempt));
            }
        }
    }
    Err(last_error)
}

/// Render a `postgres` error with its SQLSTATE and message.
pub fn describe_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db) => format!("postgres error {:?}: {}", db.code(), db.message()),
        None => error.to_string(),
    }
}

/// Create an empty database and bring it to the latest schema.
pub fn migrated_database(cluster: &TestCluster, runtime: &Runtime) -> Result<String, String> {
    let name = format!("peerbridge_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = Client::connect(&admin_url, NoTls).map_err(|err| describe_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE {name}"))
        .map_err(|err| describe_postgres_error(&err))?;

    let url = cluster.connection().database_url(&name);
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    Ok(url)
}

/// Insert students directly, bypassing the read-only directory port.
pub fn seed_students(url: &str, students: &[(i32, &str)]) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| describe_postgres_error(&err))?;
    for (student_id, name) in students {
        let email = format!("student{student_id}@example.edu");
        client
            .execute(
                "INSERT INTO users (student_id, name, email, password_hash) VALUES ($1, $2, $3, 'x')",
                &[student_id, name, &email],
            )
            .map_err(|err| describe_postgres_error(&err))?;
    }
    Ok(())
}

fn cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip the suite, or panic when a cluster is required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_required() {
        panic!("Test cluster setup failed: {reason}");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

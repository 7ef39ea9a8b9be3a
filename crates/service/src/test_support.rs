#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

// Migrations run once per test process; the outcome is shared
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Connection for DB-backed tests, or `None` when they should be skipped
/// (`SKIP_DB_TESTS` set, database unreachable or migrations failing).
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        eprintln!("skip: SKIP_DB_TESTS set");
        return None;
    }
    let mut cfg = DatabaseConfig::from_env();
    cfg.min_connections = 1;
    cfg.connect_timeout_secs = 5;
    cfg.acquire_timeout_secs = 5;
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {}", e);
                    false
                }
            }
        })
        .await;
    migrated.then_some(db)
}

/// Short random suffix for unique columns, so reruns never collide.
pub fn tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

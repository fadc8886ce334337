//! Check command - Database connectivity and schema state.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the check command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config).await?;

    db.ping().await?;
    tracing::info!("Database reachable");

    match db.pending_migrations().await? {
        None => tracing::warn!("Schema not initialised; run `migrate up`"),
        Some(0) => tracing::info!("Schema up to date"),
        Some(pending) => {
            tracing::warn!(pending, "Schema has pending migrations; run `migrate up`")
        }
    }

    Ok(())
}

use std::time::Duration;

use anyhow::{Context, Result};
use diesel::{
    Connection, PgConnection,
    connection::CacheSize,
    r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool},
};
use tracing::info;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Connections may go through a transaction-mode pooler, which cannot hold
/// server-side prepared statements.
#[derive(Debug, Default)]
struct DisablePreparedStatements;

impl CustomizeConnection<PgConnection, R2d2Error> for DisablePreparedStatements {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), R2d2Error> {
        conn.set_prepared_statement_cache_size(CacheSize::Disabled);
        Ok(())
    }
}

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

/// Builds the shared pool handed to every repository. Fails if no connection
/// can be opened within the timeout.
pub fn establish_connection(database_url: &str, max_connections: u32) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_connections.max(1))
        .connection_timeout(CONNECTION_TIMEOUT)
        .connection_customizer(Box::new(DisablePreparedStatements))
        .build(manager)
        .context("failed to build postgres connection pool")?;

    info!(max_connections, "postgres: connection pool ready");
    Ok(pool)
}

mod errors;
pub mod post_store;
use crate::config::Config;
use crate::metrics;
use crate::twoface::{DescribeErr, ExternalError, Fallible};
use anyhow::Context;
use diesel::{
    pg::PgConnection,
    r2d2::{ConnectionManager, Pool, PooledConnection},
};
use std::time::Duration;

type PgPool = Pool<ConnectionManager<PgConnection>>;
type PgConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Posts and their authors in Postgres. The schema is in migrations/.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn connect(config: &Config) -> anyhow::Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.db_dsn.as_str());
        let pool = Pool::builder()
            .max_size(config.db_pool_size)
            .connection_timeout(Duration::from_secs(config.db_connection_timeout))
            .build(manager)
            .context("couldn't connect to Postgres")?;
        let store = Self { pool };
        store.record_pool_state();
        Ok(store)
    }

    /// A connection for one query. Waiting too long for one fails with `external`.
    fn checkout(&self, external: ExternalError) -> Fallible<PgConn> {
        let conn = self.pool.get().describe_err(external);
        self.record_pool_state();
        conn
    }

    fn record_pool_state(&self) {
        let state = self.pool.state();
        metrics::record_db_pool(state.connections, state.idle_connections);
    }
}

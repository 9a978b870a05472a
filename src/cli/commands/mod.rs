pub mod backup;
pub mod config;
pub mod db;
pub mod done;
pub mod export;
pub mod habit;
pub mod init;
pub mod log;
pub mod stats;
pub mod user;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database with every pending migration applied.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

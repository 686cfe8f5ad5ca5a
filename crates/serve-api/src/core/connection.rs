use std::{path::PathBuf, time::Duration};

use rusqlite::{Connection, OpenFlags};

use crate::{
    core::{
        query,
        types::{QueryRequest, ResultSet},
    },
    error::{AppError, AppResult},
};

/// Read-only handle on the SQLite file behind `/api`.
///
/// Holds no connection. Every [`Store::read`] opens its own, so concurrent
/// requests never share connection state; the connection is dropped when the
/// blocking task returns, whichever way it returns.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_millis(2_000),
        }
    }

    pub fn open(&self) -> AppResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let unavailable = |source: rusqlite::Error| AppError::StoreUnavailable {
            path: self.path.clone(),
            source,
        };
        let conn = Connection::open_with_flags(&self.path, flags).map_err(unavailable)?;
        conn.busy_timeout(self.busy_timeout).map_err(unavailable)?;
        Ok(conn)
    }

    /// Open a connection, run one read and release the connection, off the
    /// async executor. `timeout` bounds how long the caller waits; `None`
    /// waits indefinitely.
    pub async fn read(&self, req: QueryRequest, timeout: Option<Duration>) -> AppResult<ResultSet> {
        let store = self.clone();
        let task = tokio::task::spawn_blocking(move || {
            let conn = store.open()?;
            query::run_read(&conn, &req)
        });

        let joined = match timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| AppError::Timeout(limit.as_millis()))?,
            None => task.await,
        };
        joined.map_err(|e| AppError::Internal(format!("db task failed: {e}")))?
    }
}

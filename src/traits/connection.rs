use async_trait::async_trait;

use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::{ConnectionId, ConnectionState, QueryResult, SqlValue};

/// A live channel to a database, produced by a [`DatabaseDriver`].
///
/// Implementations serialize operations issued concurrently on the same
/// connection. Concurrency across the application comes from opening more
/// connections, not from sharing one.
///
/// Every operation fails with `ConnectionClosed` after [`Connection::close`].
#[async_trait]
pub trait Connection: Send + Sync {
    fn id(&self) -> ConnectionId;

    /// The driver that created this connection.
    fn driver(&self) -> &dyn DatabaseDriver;

    /// Execute a SQL statement, binding `params` positionally through the
    /// engine's parameter mechanism. An empty slice binds nothing.
    ///
    /// Row-returning statements resolve to `QueryResult::Rows`; other
    /// statements resolve to an affected-row count or `QueryResult::Empty`.
    /// Fails with `ParameterMismatch` if the number of values differs from
    /// the number of placeholders.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<QueryResult>;

    /// Open a transaction. Fails with `TransactionState` if one is already open.
    async fn begin_transaction(&self) -> Result<()>;

    /// Apply the open transaction. Fails with `TransactionState` if none is open.
    async fn commit(&self) -> Result<()>;

    /// Discard the open transaction. Fails with `TransactionState` if none is open.
    async fn rollback(&self) -> Result<()>;

    /// Release the connection. An open transaction is discarded.
    async fn close(&self) -> Result<()>;

    async fn state(&self) -> ConnectionState;
}

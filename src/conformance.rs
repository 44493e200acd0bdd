//! Protocol checks any [`DatabaseDriver`] implementation can be run against.
//!
//! Each check opens its own connections and closes them when it passes.
//!
//! ```ignore
//! let driver = MyDriver::new(config.clone());
//! let other = MyDriver::new(config);
//! ormdriver::conformance::run_all(&driver, &other, "SELECT $1").await?;
//! ```

use thiserror::Error;
use tracing::debug;

use crate::error::{DriverError, ErrorKind};
use crate::traits::DatabaseDriver;
use crate::types::{ConnectionState, SqlValue};

#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("Driver error during check: {0}")]
    Driver(#[from] DriverError),

    #[error("Check '{check}' failed: {detail}")]
    Violation { check: &'static str, detail: String },
}

fn violation(check: &'static str, detail: impl Into<String>) -> ConformanceError {
    ConformanceError::Violation {
        check,
        detail: detail.into(),
    }
}

fn expect_kind(
    check: &'static str,
    what: &str,
    outcome: Result<impl std::fmt::Debug, DriverError>,
    kind: ErrorKind,
) -> Result<(), ConformanceError> {
    match outcome {
        Err(e) if e.kind() == kind => Ok(()),
        Err(e) => Err(violation(
            check,
            format!("{what} failed with {:?}, expected {:?}", e.kind(), kind),
        )),
        Ok(v) => Err(violation(check, format!("{what} succeeded with {v:?}"))),
    }
}

/// Every operation on a closed connection fails with `ConnectionClosed`.
pub async fn check_close_is_terminal(driver: &dyn DatabaseDriver) -> Result<(), ConformanceError> {
    const CHECK: &str = "close is terminal";
    let conn = driver.create().await?;
    conn.close().await?;

    if conn.state().await != ConnectionState::Closed {
        return Err(violation(CHECK, "state is not closed after close()"));
    }
    expect_kind(CHECK, "query", conn.query("SELECT 1", &[]).await, ErrorKind::ConnectionClosed)?;
    expect_kind(CHECK, "begin", conn.begin_transaction().await, ErrorKind::ConnectionClosed)?;
    expect_kind(CHECK, "commit", conn.commit().await, ErrorKind::ConnectionClosed)?;
    expect_kind(CHECK, "rollback", conn.rollback().await, ErrorKind::ConnectionClosed)?;
    expect_kind(CHECK, "close", conn.close().await, ErrorKind::ConnectionClosed)?;
    Ok(())
}

/// After begin/commit or begin/rollback no transaction is pending, and
/// finishing again without a new begin fails.
pub async fn check_transaction_cycle(driver: &dyn DatabaseDriver) -> Result<(), ConformanceError> {
    const CHECK: &str = "transaction cycle";
    let conn = driver.create().await?;

    expect_kind(CHECK, "commit from idle", conn.commit().await, ErrorKind::TransactionState)?;
    expect_kind(CHECK, "rollback from idle", conn.rollback().await, ErrorKind::TransactionState)?;

    conn.begin_transaction().await?;
    expect_kind(
        CHECK,
        "nested begin",
        conn.begin_transaction().await,
        ErrorKind::TransactionState,
    )?;
    conn.commit().await?;
    if conn.state().await != ConnectionState::Idle {
        return Err(violation(CHECK, "transaction still open after commit"));
    }
    expect_kind(CHECK, "second commit", conn.commit().await, ErrorKind::TransactionState)?;
    expect_kind(CHECK, "rollback after commit", conn.rollback().await, ErrorKind::TransactionState)?;

    conn.begin_transaction().await?;
    conn.rollback().await?;
    expect_kind(CHECK, "second rollback", conn.rollback().await, ErrorKind::TransactionState)?;

    conn.close().await?;
    Ok(())
}

/// Independently constructed drivers have distinct ids, and connections
/// from one driver have ids distinct from each other.
pub async fn check_distinct_ids(
    driver: &dyn DatabaseDriver,
    other: &dyn DatabaseDriver,
) -> Result<(), ConformanceError> {
    const CHECK: &str = "distinct ids";
    if driver.id() == other.id() {
        return Err(violation(CHECK, "two drivers share an id"));
    }

    let first = driver.create().await?;
    let second = driver.create().await?;
    if first.id() == second.id() {
        return Err(violation(CHECK, "two connections share an id"));
    }
    if first.driver().id() != driver.id() {
        return Err(violation(CHECK, "connection does not refer back to its driver"));
    }

    first.close().await?;
    second.close().await?;
    Ok(())
}

/// A statement with exactly one placeholder rejects zero and two values.
pub async fn check_arity_mismatch_rejected(
    driver: &dyn DatabaseDriver,
    one_placeholder_sql: &str,
) -> Result<(), ConformanceError> {
    const CHECK: &str = "arity mismatch rejected";
    let conn = driver.create().await?;

    expect_kind(
        CHECK,
        "query with missing value",
        conn.query(one_placeholder_sql, &[]).await,
        ErrorKind::ParameterMismatch,
    )?;
    expect_kind(
        CHECK,
        "query with extra value",
        conn.query(one_placeholder_sql, &[SqlValue::from(1), SqlValue::from(2)])
            .await,
        ErrorKind::ParameterMismatch,
    )?;

    conn.close().await?;
    Ok(())
}

/// Runs every engine-neutral check. `one_placeholder_sql` must be a valid
/// statement in the driver's dialect with a single positional placeholder.
pub async fn run_all(
    driver: &dyn DatabaseDriver,
    other: &dyn DatabaseDriver,
    one_placeholder_sql: &str,
) -> Result<(), ConformanceError> {
    check_close_is_terminal(driver).await?;
    check_transaction_cycle(driver).await?;
    check_distinct_ids(driver, other).await?;
    check_arity_mismatch_rejected(driver, one_placeholder_sql).await?;
    debug!(driver = driver.name(), "conformance checks passed");
    Ok(())
}

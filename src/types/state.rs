use std::fmt;

use crate::error::{DriverError, Result};

/// Transaction state of a connection.
///
/// `Idle -> InTransaction -> Idle` through begin and commit/rollback;
/// `Closed` is terminal. Transitions that are not listed fail and leave
/// the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    InTransaction,
    Closed,
}

impl ConnectionState {
    /// Fails with `ConnectionClosed` once the connection is closed.
    pub fn ensure_open(self) -> Result<()> {
        match self {
            ConnectionState::Closed => Err(DriverError::ConnectionClosed),
            _ => Ok(()),
        }
    }

    pub fn in_transaction(self) -> bool {
        self == ConnectionState::InTransaction
    }

    /// Checks that a transaction may be opened. Does not transition.
    pub fn check_begin(self) -> Result<()> {
        self.ensure_open()?;
        match self {
            ConnectionState::Idle => Ok(()),
            state => Err(DriverError::TransactionState {
                operation: "begin a transaction",
                state,
            }),
        }
    }

    /// Checks that the open transaction may be committed or rolled back.
    pub fn check_finish(self, operation: &'static str) -> Result<()> {
        self.ensure_open()?;
        match self {
            ConnectionState::InTransaction => Ok(()),
            state => Err(DriverError::TransactionState { operation, state }),
        }
    }

    pub fn begin(&mut self) -> Result<()> {
        self.check_begin()?;
        *self = ConnectionState::InTransaction;
        Ok(())
    }

    pub fn finish(&mut self, operation: &'static str) -> Result<()> {
        self.check_finish(operation)?;
        *self = ConnectionState::Idle;
        Ok(())
    }

    /// Moves to `Closed`, returning the state that was left.
    pub fn close(&mut self) -> Result<ConnectionState> {
        self.ensure_open()?;
        Ok(std::mem::replace(self, ConnectionState::Closed))
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Idle => "idle",
            ConnectionState::InTransaction => "in a transaction",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

//! ormdriver - the contract between database drivers and a mapping layer
//!
//! A [`DatabaseDriver`] is a connection factory for one configured database
//! target. Each [`Connection`] it creates is an independent unit of work
//! that runs queries and controls transactions.
//!
//! # Example
//! ```ignore
//! use ormdriver::{Client, SqlValue};
//!
//! let client = Client::connect_postgres("postgres://localhost/mydb")?;
//! let conn = client.connection().await?;
//!
//! conn.begin_transaction().await?;
//! conn.query("INSERT INTO users (name) VALUES ($1)", &[SqlValue::from("Ann")])
//!     .await?;
//! conn.commit().await?;
//!
//! let row = conn
//!     .query("SELECT id, name FROM users WHERE name = $1", &["Ann".into()])
//!     .await?
//!     .single_row()?;
//! let name = row.try_get("name")?;
//!
//! conn.close().await?;
//! ```

pub mod conformance;
pub mod drivers;
pub mod error;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use client::Client;
pub use error::{DriverError, ErrorKind, Result};
pub use traits::{Connection, DatabaseDriver};
pub use types::{
    ConnectionId, ConnectionState, DriverId, QueryResult, Row, Rows, SqlValue, Value,
};

mod id;
mod result;
mod row;
mod sql_value;
mod state;

pub use id::{ConnectionId, DriverId};
pub use result::QueryResult;
pub use row::{Row, Rows};
pub use sql_value::{SqlValue, Value};
pub use state::ConnectionState;

mod connection;
mod driver;

pub use connection::Connection;
pub use driver::DatabaseDriver;

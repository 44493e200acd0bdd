use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Connection;
use crate::types::DriverId;

/// Trait for database driver implementations.
/// A driver holds the configuration for one database target and acts as a
/// connection factory. It does not keep track of the connections it creates.
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Stable identity of this driver instance.
    fn id(&self) -> DriverId;

    /// Engine name, e.g. `"postgres"`.
    fn name(&self) -> &str;

    /// Open a new, independent connection.
    /// Fails with `ConnectionFailed` if the engine cannot be reached or
    /// authenticated.
    async fn create(&self) -> Result<Box<dyn Connection>>;
}

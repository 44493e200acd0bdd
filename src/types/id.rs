use uuid::Uuid;

/// Opaque identity of a driver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverId(Uuid);

impl DriverId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Opaque identity of a connection, distinct from its driver's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

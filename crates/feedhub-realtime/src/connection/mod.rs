//! WebSocket connection management: handles, pool and lifecycle.

pub mod handle;
pub mod manager;
pub mod pool;

pub use handle::{ConnectionHandle, ConnectionId};
pub use manager::ConnectionManager;
pub use pool::ConnectionPool;

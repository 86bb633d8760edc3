//! # feedhub-realtime
//!
//! Real-time engine for FeedHub. Tracks authenticated WebSocket
//! connections and pushes post changes to every connected client.

pub mod broadcaster;
pub mod connection;
pub mod message;
pub mod server;

pub use broadcaster::PostBroadcaster;
pub use connection::{ConnectionHandle, ConnectionManager};
pub use message::{InboundMessage, OutboundMessage};
pub use server::RealtimeEngine;

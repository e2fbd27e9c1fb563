//! Internal modules for the bot client.
//!
//! This library provides configuration, logger setup and the WebSocket
//! session driver used by the pb_client binary.

pub mod config;
pub mod logging;
pub mod websocket_client;

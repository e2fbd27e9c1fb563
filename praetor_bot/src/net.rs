//! Networking layer for the match server protocol.
//!
//! Messages are JSON objects in WebSocket text frames, discriminated by a
//! `message_type` field. Outbound messages are signed with HMAC-SHA256 and
//! written in order through the outbox.

/// Protocol error types.
pub mod errors;

/// Message types for the client-server protocol.
pub mod messages;

/// Ordered outbound queue with per-frame completion receipts.
pub mod outbox;

/// HMAC-SHA256 signing of outbound messages.
pub mod signer;

/// Frame decoding and encoding.
pub mod utils;

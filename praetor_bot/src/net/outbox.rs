//! Ordered outbound queue.
//!
//! Frames are handed to a single writer in the order they were queued. Each
//! queued frame comes with a [`SendReceipt`] that resolves once the writer
//! reports the frame written, or failed.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Capacity of the outbound queue.
pub const OUTBOX_CAPACITY: usize = 32;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OutboxError {
    #[error("outbox is closed")]
    Closed,
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// A frame waiting for the writer.
#[derive(Debug)]
pub struct OutgoingFrame {
    pub payload: String,
    done: oneshot::Sender<Result<(), String>>,
}

impl OutgoingFrame {
    /// Report the outcome of writing this frame back to whoever queued it.
    pub fn complete(self, result: Result<(), String>) {
        // The sender may have stopped waiting; that's fine.
        let _ = self.done.send(result);
    }
}

#[derive(Debug)]
pub struct SendReceipt(oneshot::Receiver<Result<(), String>>);

impl SendReceipt {
    pub async fn wait(self) -> Result<(), OutboxError> {
        match self.0.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(OutboxError::WriteFailed(error)),
            Err(_) => Err(OutboxError::Closed),
        }
    }
}

/// Queueing half of the outbox.
#[derive(Clone, Debug)]
pub struct Outbox {
    sender: mpsc::Sender<OutgoingFrame>,
}

/// Draining half of the outbox, owned by the writer.
#[derive(Debug)]
pub struct OutboxReceiver {
    inbox: mpsc::Receiver<OutgoingFrame>,
}

impl OutboxReceiver {
    /// Next frame in FIFO order, or `None` once every [`Outbox`] is dropped.
    pub async fn recv(&mut self) -> Option<OutgoingFrame> {
        self.inbox.recv().await
    }
}

pub fn outbox() -> (Outbox, OutboxReceiver) {
    let (sender, inbox) = mpsc::channel(OUTBOX_CAPACITY);
    (Outbox { sender }, OutboxReceiver { inbox })
}

impl Outbox {
    /// Queue a frame behind everything queued before it.
    pub async fn send(&self, payload: String) -> Result<SendReceipt, OutboxError> {
        let (done, receipt) = oneshot::channel();
        self.sender
            .send(OutgoingFrame { payload, done })
            .await
            .map_err(|_| OutboxError::Closed)?;
        Ok(SendReceipt(receipt))
    }
}

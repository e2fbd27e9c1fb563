//! WebSocket client for a match server session.

use chrono::{DateTime, Utc};
use futures_util::{SinkExt, Stream, StreamExt};
use log::{debug, info, warn};
use praetor_bot::{
    ClientMessage, Dispatcher, OutboxError, ProtocolError, SessionPhase,
    net::outbox::{Outbox, outbox},
    utils::encode_message,
};
use std::fmt;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::{
    WebSocketStream, connect_async,
    tungstenite::{self, Message, error::ProtocolError as WsProtocolError},
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to connect: {0}")]
    Connect(#[source] tungstenite::Error),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("transport error: {0}")]
    Transport(#[from] tungstenite::Error),
    #[error("outbound queue: {0}")]
    Outbox(#[from] OutboxError),
    #[error("writer task failed: {0}")]
    Writer(#[from] tokio::task::JoinError),
}

/// Summary of a finished session.
#[derive(Clone, Debug)]
pub struct SessionReport {
    pub hands_played: u64,
    pub actions_sent: u64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub final_phase: SessionPhase,
}

impl SessionReport {
    fn new(dispatcher: &Dispatcher, started_at: DateTime<Utc>) -> Self {
        Self {
            hands_played: dispatcher.hands_played(),
            actions_sent: dispatcher.actions_sent(),
            started_at,
            ended_at: Utc::now(),
            final_phase: dispatcher.phase(),
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed = self.ended_at - self.started_at;
        write!(
            f,
            "{} hands played, {} actions sent in {}s ({})",
            self.hands_played,
            self.actions_sent,
            elapsed.num_seconds(),
            self.final_phase
        )
    }
}

/// WebSocket match client
pub struct WebSocketClient {
    ws_url: String,
}

impl WebSocketClient {
    /// Create a new WebSocket client
    pub fn new(ws_url: String) -> Self {
        Self { ws_url }
    }

    /// Connect to the match server and play until the match ends or the
    /// connection closes.
    pub async fn connect_and_play(
        self,
        dispatcher: &mut Dispatcher,
    ) -> Result<SessionReport, SessionError> {
        info!("Connecting to {}", self.ws_url);

        let (ws_stream, _) = connect_async(self.ws_url.as_str())
            .await
            .map_err(SessionError::Connect)?;

        info!("Connected");
        run_session(ws_stream, dispatcher).await
    }
}

/// Drive one session over an established WebSocket.
///
/// The check-in goes out first. After that, frames are handled strictly in
/// arrival order and every reply is confirmed written before the next frame
/// is read.
pub async fn run_session<S>(
    ws_stream: WebSocketStream<S>,
    dispatcher: &mut Dispatcher,
) -> Result<SessionReport, SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let started_at = Utc::now();
    let (mut write, mut read) = ws_stream.split();
    let (outbox, mut receiver) = outbox();

    // Single writer so frames hit the socket in queue order.
    let writer = tokio::spawn(async move {
        while let Some(frame) = receiver.recv().await {
            let result = write
                .send(Message::Text(frame.payload.clone().into()))
                .await
                .map_err(|e| e.to_string());
            let failed = result.is_err();
            frame.complete(result);
            if failed {
                break;
            }
        }
        let _ = write.close().await;
    });

    let result = play(&mut read, &outbox, dispatcher).await;

    drop(outbox);
    writer.await?;
    result?;

    let report = SessionReport::new(dispatcher, started_at);
    info!("Session over: {report}");
    Ok(report)
}

async fn send(outbox: &Outbox, message: &ClientMessage) -> Result<(), SessionError> {
    let payload = encode_message(message)?;
    debug!("sending {payload}");
    outbox.send(payload).await?.wait().await?;
    Ok(())
}

async fn play<R>(
    read: &mut R,
    outbox: &Outbox,
    dispatcher: &mut Dispatcher,
) -> Result<(), SessionError>
where
    R: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    send(outbox, &dispatcher.check_in()).await?;
    info!("Checked in to match {}", dispatcher.match_state().identity().match_id);

    while !dispatcher.is_finished() {
        let Some(message) = read.next().await else {
            info!("Connection closed");
            return Ok(());
        };

        match message {
            Ok(Message::Text(text)) => {
                if let Some(reply) = dispatcher.handle_frame(text.as_str())? {
                    send(outbox, &reply).await?;
                }
            }
            Ok(Message::Binary(_)) => return Err(ProtocolError::BinaryFrame.into()),
            Ok(Message::Close(frame)) => {
                match frame {
                    Some(frame) => info!("Server closed connection: {}", frame.reason.as_str()),
                    None => info!("Server closed connection"),
                }
                return Ok(());
            }
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
            Err(
                tungstenite::Error::ConnectionClosed
                | tungstenite::Error::AlreadyClosed
                | tungstenite::Error::Protocol(WsProtocolError::ResetWithoutClosingHandshake),
            ) => {
                warn!("Connection dropped");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

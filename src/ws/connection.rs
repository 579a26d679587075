use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::error::SyncError;
use crate::models::SendMessage;

type BoxedSink = Pin<Box<dyn Sink<Message, Error = axum::Error> + Send>>;
type BoxedStream = Pin<Box<dyn Stream<Item = Result<Message, axum::Error>> + Send>>;

/// Frames a connection may have queued before it counts as wedged.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// Outbound half of one client's link.
///
/// Frames are queued to a writer task that owns the sink, so the sink has a
/// single writer no matter how many broadcasts target this connection, and
/// `send` never waits on the peer. A full queue, a failed write or `close`
/// make the connection unusable and fire its close signal.
pub struct Connection {
    id: Uuid,
    document_id: String,
    queue: Mutex<Option<mpsc::Sender<Message>>>,
    closed: Arc<watch::Sender<bool>>,
}

/// Inbound half of one client's link. Owned by exactly one read loop.
pub struct ConnectionReader {
    id: Uuid,
    stream: BoxedStream,
}

impl Connection {
    /// Wrap a transport split into its outbound sink and inbound stream.
    ///
    /// Spawns the writer task, so this must run inside a tokio runtime.
    pub fn new<S, R>(document_id: impl Into<String>, sink: S, stream: R) -> (Arc<Connection>, ConnectionReader)
    where
        S: Sink<Message, Error = axum::Error> + Send + 'static,
        R: Stream<Item = Result<Message, axum::Error>> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let sink: BoxedSink = Box::pin(sink);
        let stream: BoxedStream = Box::pin(stream);

        let (queue_tx, queue_rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        let (closed, _) = watch::channel(false);
        let closed = Arc::new(closed);
        tokio::spawn(write_loop(id, sink, queue_rx, closed.clone()));

        let connection = Arc::new(Connection {
            id,
            document_id: document_id.into(),
            queue: Mutex::new(Some(queue_tx)),
            closed,
        });
        let reader = ConnectionReader { id, stream };
        (connection, reader)
    }

    pub fn from_socket(document_id: impl Into<String>, socket: WebSocket) -> (Arc<Connection>, ConnectionReader) {
        let (sink, stream) = socket.split();
        Self::new(document_id, sink, stream)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Serialize `msg` as JSON and queue it as one text frame.
    ///
    /// Fails with `WriteFailed` when the peer has fallen
    /// `OUTBOUND_QUEUE_CAPACITY` frames behind, and with `StreamClosed` once
    /// the connection is closed or its writer has stopped.
    pub fn send(&self, msg: &SendMessage) -> Result<(), SyncError> {
        let text = serde_json::to_string(msg).map_err(|e| SyncError::WriteFailed(e.to_string()))?;

        let queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let queue = queue.as_ref().ok_or(SyncError::StreamClosed)?;
        match queue.try_send(Message::Text(text)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SyncError::WriteFailed("outbound queue full".to_string())),
            Err(TrySendError::Closed(_)) => Err(SyncError::StreamClosed),
        }
    }

    /// Stop accepting frames and fire the close signal. Idempotent.
    ///
    /// The writer flushes whatever the sink takes without waiting, sends a
    /// close frame on the same terms and exits.
    pub fn close(&self) {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).take();
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolves once the connection is closed, evicted or its writer failed.
    pub async fn closed(&self) {
        closed_signal(&mut self.closed.subscribe()).await;
    }
}

async fn closed_signal(signal: &mut watch::Receiver<bool>) {
    // Senders are only dropped together with the connection.
    let _ = signal.wait_for(|closed| *closed).await;
}

/// Sole writer of a connection's sink.
async fn write_loop(
    id: Uuid,
    mut sink: BoxedSink,
    mut queue: mpsc::Receiver<Message>,
    closed: Arc<watch::Sender<bool>>,
) {
    let mut signal = closed.subscribe();

    while let Some(msg) = queue.recv().await {
        // A wedged peer must not keep this task alive past close.
        let written = tokio::select! {
            biased;
            written = sink.send(msg) => written,
            _ = closed_signal(&mut signal) => break,
        };
        if let Err(e) = written {
            debug!("Write to connection {} failed: {}", id, e);
            closed.send_replace(true);
            return;
        }
    }

    tokio::select! {
        biased;
        result = sink.close() => {
            if let Err(e) = result {
                debug!("Closing connection {} failed: {}", id, e);
            }
        }
        _ = closed_signal(&mut signal) => {}
    }
    debug!("Writer for connection {} stopped", id);
}

impl ConnectionReader {
    /// Wait for the next data frame.
    ///
    /// Control frames are skipped. Binary frames are accepted when they hold
    /// UTF-8 text. A close frame, the end of the stream or a transport error
    /// all end the connection with `StreamClosed`. Cancel safe.
    pub async fn receive(&mut self) -> Result<String, SyncError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Binary(bytes))) => {
                    return String::from_utf8(bytes)
                        .map_err(|e| SyncError::MalformedMessage(e.to_string()));
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                Some(Ok(Message::Close(_))) | None => return Err(SyncError::StreamClosed),
                Some(Err(e)) => {
                    debug!("Read from connection {} failed: {}", self.id, e);
                    return Err(SyncError::StreamClosed);
                }
            }
        }
    }
}

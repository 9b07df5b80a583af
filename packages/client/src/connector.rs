//! Connection manager for the live-feed server.
//!
//! [`LiveFeedConnector`] owns at most one WebSocket, keeps every parsed
//! server frame in an append-only log and fans each new frame out to the
//! registered handlers together with the full log.
//!
//! Handlers run on the reader task. They may register or remove handlers,
//! but must not call [`LiveFeedConnector::close`] from inside the callback.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use livefeed_shared::protocol::{ClientCommand, FeedCommand, ServerMessage};
use tokio::{
    sync::{Mutex as AsyncMutex, mpsc, watch},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::error::ClientError;

/// Callback invoked with `(new_message, full_log)` for every inbound frame
pub type MessageHandler = Arc<dyn Fn(&ServerMessage, &[ServerMessage]) + Send + Sync>;

/// How long `close` waits for the close frame to be flushed
const CLOSE_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the connector and its reader task
#[derive(Default)]
struct Shared {
    handlers: Mutex<Vec<MessageHandler>>,
    log: Mutex<Arc<Vec<ServerMessage>>>,
}

impl Shared {
    fn dispatch(&self, raw: &str) {
        let message: ServerMessage = match serde_json::from_str(raw) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Discarding unparseable frame {:?}: {}", raw, e);
                return;
            }
        };
        tracing::debug!("↙ {}", raw);

        let (log, handlers) = {
            let mut log = lock(&self.log);
            Arc::make_mut(&mut *log).push(message);
            (Arc::clone(&*log), lock(&self.handlers).clone())
        };

        if let Some(latest) = log.last() {
            for handler in &handlers {
                handler(latest, &log);
            }
        }
    }
}

/// One open socket with its reader and writer tasks
struct Link {
    writer: mpsc::UnboundedSender<Message>,
    reader_task: JoinHandle<()>,
    writer_task: JoinHandle<()>,
    open: watch::Receiver<bool>,
}

impl Link {
    fn is_open(&self) -> bool {
        *self.open.borrow() && !self.reader_task.is_finished() && !self.writer.is_closed()
    }

    async fn shutdown(&mut self) {
        if self.writer.send(Message::Close(None)).is_ok()
            && tokio::time::timeout(CLOSE_FLUSH_TIMEOUT, &mut self.writer_task)
                .await
                .is_err()
        {
            tracing::debug!("Close frame was not flushed in time");
        }
        self.writer_task.abort();
        self.reader_task.abort();
        let _ = (&mut self.reader_task).await;
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        self.writer_task.abort();
        self.reader_task.abort();
    }
}

/// Client-side manager of a single live-feed connection
///
/// # Example
///
/// ```ignore
/// let connector = LiveFeedConnector::new("ws://127.0.0.1:3001/ws");
/// connector.on_message(Arc::new(|msg: &ServerMessage, log: &[ServerMessage]| {
///     println!("{:?} ({} received)", msg, log.len());
/// }));
/// connector.connect().await?;
/// connector.send_command(FeedCommand::Start).await?;
/// ```
pub struct LiveFeedConnector {
    url: String,
    shared: Arc<Shared>,
    link: AsyncMutex<Option<Link>>,
}

impl LiveFeedConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            shared: Arc::new(Shared::default()),
            link: AsyncMutex::new(None),
        }
    }

    /// Open the socket unless one is already live
    ///
    /// A socket the server has already closed is replaced. The message log
    /// survives the replacement.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConnectionError`] if the handshake fails.
    pub async fn connect(&self) -> Result<(), ClientError> {
        let mut link = self.link.lock().await;
        if link.as_ref().is_some_and(Link::is_open) {
            tracing::debug!("Already connected to {}", self.url);
            return Ok(());
        }
        if let Some(mut stale) = link.take() {
            stale.shutdown().await;
        }

        let (ws_stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        tracing::info!("Connected to live-feed server at {}", self.url);

        let (mut sink, mut stream) = ws_stream.split();
        let (writer, mut outgoing) = mpsc::unbounded_channel::<Message>();
        let (open_tx, open) = watch::channel(true);

        let writer_task = tokio::spawn(async move {
            while let Some(message) = outgoing.recv().await {
                let closing = matches!(message, Message::Close(_));
                if let Err(e) = sink.send(message).await {
                    tracing::warn!("WebSocket write error: {}", e);
                    break;
                }
                if closing {
                    break;
                }
            }
        });

        let shared = Arc::clone(&self.shared);
        let reader_task = tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => shared.dispatch(text.as_str()),
                    Ok(Message::Binary(bytes)) => {
                        shared.dispatch(&String::from_utf8_lossy(&bytes))
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        break;
                    }
                }
            }
            let _ = open_tx.send(false);
        });

        *link = Some(Link {
            writer,
            reader_task,
            writer_task,
            open,
        });
        Ok(())
    }

    /// Register a handler; the same handler may be registered more than once
    pub fn on_message(&self, handler: MessageHandler) {
        lock(&self.shared.handlers).push(handler);
    }

    /// Remove every registration of `handler`
    pub fn off(&self, handler: &MessageHandler) {
        lock(&self.shared.handlers).retain(|h| !Arc::ptr_eq(h, handler));
    }

    /// Send a feed command if the socket is open, otherwise drop it
    pub async fn send_command(&self, command: FeedCommand) -> Result<(), ClientError> {
        let link = self.link.lock().await;
        let Some(link) = link.as_ref().filter(|l| l.is_open()) else {
            tracing::debug!("Not connected, dropping '{}' command", command);
            return Ok(());
        };

        let json = serde_json::to_string(&ClientCommand::new(command))?;
        if link.writer.send(Message::Text(json.clone().into())).is_err() {
            tracing::debug!("Writer closed, dropping '{}' command", command);
            return Ok(());
        }
        tracing::debug!("↗ {}", json);
        Ok(())
    }

    /// Close the socket and forget all handlers and received messages
    ///
    /// Calling this while already closed only clears the local state.
    pub async fn close(&self) {
        // Held until the state is cleared so a concurrent `connect` starts afterwards
        let mut link = self.link.lock().await;
        if let Some(mut current) = link.take() {
            current.shutdown().await;
            tracing::info!("Disconnected from {}", self.url);
        }
        lock(&self.shared.handlers).clear();
        *lock(&self.shared.log) = Arc::default();
    }

    pub async fn is_connected(&self) -> bool {
        self.link.lock().await.as_ref().is_some_and(Link::is_open)
    }

    /// Resolve once the current socket is closed (immediately if none)
    pub async fn wait_closed(&self) {
        let open = match self.link.lock().await.as_ref() {
            Some(link) => link.open.clone(),
            None => return,
        };
        let mut open = open;
        // A dropped sender also means the reader is gone
        let _ = open.wait_for(|is_open| !*is_open).await;
    }

    /// Snapshot of every message received since the last `close`
    pub fn messages(&self) -> Vec<ServerMessage> {
        lock(&self.shared.log).to_vec()
    }

    pub fn message_count(&self) -> usize {
        lock(&self.shared.log).len()
    }
}

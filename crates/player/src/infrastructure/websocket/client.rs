//! Desktop WebSocket client using tokio-tungstenite

use futures_util::stream::SplitStream;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use connect4_protocol::WireMessage;

use crate::error::TransportError;
use crate::infrastructure::messaging::{BusMessage, CommandBus};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Read half of the socket; owned by whoever routes inbound frames.
pub type InboundFrames = SplitStream<WsStream>;

/// An open connection to the game authority.
pub struct WebSocketConnection {
    /// Outbound messages go through here (and only here)
    pub command_bus: CommandBus,
    /// Inbound frames in delivery order
    pub inbound: InboundFrames,
    /// Resolves with the error that stopped the writer, if one did
    pub write_failure: oneshot::Receiver<TransportError>,
    writer: JoinHandle<()>,
}

impl WebSocketConnection {
    /// Wait for the writer task to flush and exit.
    ///
    /// The writer exits after sending a close frame, so call
    /// `command_bus.close(..)` first.
    pub async fn finish(self) {
        let WebSocketConnection {
            command_bus,
            inbound,
            write_failure,
            writer,
        } = self;
        drop(command_bus);
        drop(inbound);
        drop(write_failure);
        if let Err(e) = writer.await {
            tracing::error!("WebSocket writer task failed: {}", e);
        }
    }
}

/// Connect to the authority and spawn the writer task.
///
/// No retries: a failed connect is returned to the caller.
pub async fn open(url: &str) -> Result<WebSocketConnection, TransportError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(TransportError::Connect)?;
    tracing::info!("Connected to game server at {}", url);

    let (write, inbound) = ws_stream.split();
    let (tx, rx) = mpsc::unbounded_channel::<BusMessage>();
    let (failure_tx, write_failure) = oneshot::channel();
    let writer = tokio::spawn(writer_task(write, rx, failure_tx));

    Ok(WebSocketConnection {
        command_bus: CommandBus::new(tx),
        inbound,
        write_failure,
        writer,
    })
}

async fn writer_task<S>(
    write: S,
    rx: mpsc::UnboundedReceiver<BusMessage>,
    failure: oneshot::Sender<TransportError>,
) where
    S: Sink<Message, Error = WsError> + Unpin,
{
    if let Err(e) = write_frames(write, rx).await {
        tracing::error!("WebSocket writer stopped: {}", e);
        // The driver may already be gone
        let _ = failure.send(e);
    }
    tracing::debug!("Writer task completed");
}

/// Drain the bus into the socket until a close request or the first failure.
async fn write_frames<S>(
    mut write: S,
    mut rx: mpsc::UnboundedReceiver<BusMessage>,
) -> Result<(), TransportError>
where
    S: Sink<Message, Error = WsError> + Unpin,
{
    while let Some(msg) = rx.recv().await {
        match msg {
            BusMessage::Send(message) => {
                let json = message.encode().map_err(TransportError::Encode)?;
                tracing::debug!(frame = %json, "Sending frame");
                write
                    .send(Message::Text(json))
                    .await
                    .map_err(TransportError::Write)?;
            }
            BusMessage::Close(code) => {
                let frame = CloseFrame {
                    code: CloseCode::from(code),
                    reason: "".into(),
                };
                // The peer may have hung up first; nothing is waiting on this
                if let Err(e) = write.send(Message::Close(Some(frame))).await {
                    tracing::warn!(code, "Failed to send close frame: {}", e);
                }
                return Ok(());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};
    use std::task::{Context, Poll};

    use connect4_protocol::ClientMessage;

    use super::*;

    /// Sink that records frames, or refuses every write.
    #[derive(Clone, Default)]
    struct TestSink {
        sent: Arc<Mutex<Vec<Message>>>,
        broken: bool,
    }

    impl Sink<Message> for TestSink {
        type Error = WsError;

        fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), WsError>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(self: Pin<&mut Self>, item: Message) -> Result<(), WsError> {
            if self.broken {
                return Err(WsError::ConnectionClosed);
            }
            self.sent.lock().expect("lock").push(item);
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), WsError>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), WsError>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (failure_tx, failure_rx) = oneshot::channel();
        let bus = CommandBus::new(tx);
        let sink = TestSink {
            broken: true,
            ..TestSink::default()
        };

        bus.send(ClientMessage::Init {
            join: None,
            watch: None,
        })
        .expect("queued");
        writer_task(sink, rx, failure_tx).await;

        let failure = failure_rx.await.expect("failure reported");
        assert!(matches!(failure, TransportError::Write(_)));
        assert!(matches!(
            bus.send(ClientMessage::Play { column: 0 }),
            Err(TransportError::SendFailed(_))
        ));
    }

    #[tokio::test]
    async fn close_request_ends_writer_without_failure() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (failure_tx, failure_rx) = oneshot::channel();
        let bus = CommandBus::new(tx);
        let sink = TestSink::default();

        bus.send(ClientMessage::Play { column: 3 }).expect("queued");
        bus.close(1000).expect("close queued");
        writer_task(sink.clone(), rx, failure_tx).await;

        assert!(failure_rx.await.is_err());
        let sent = sink.sent.lock().expect("lock");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], Message::Text(r#"{"type":"play","column":3}"#.to_string()));
        assert!(matches!(
            &sent[1],
            Message::Close(Some(frame)) if frame.code == CloseCode::Normal
        ));
    }
}

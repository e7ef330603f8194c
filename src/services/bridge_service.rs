use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dto::chat::{BridgeInboundMessage, BridgeOutboundMessage},
    services::chat_service,
    state::SharedState,
};

/// Failure to hand a frame to the bridge writer task.
#[derive(Debug, Error)]
#[error("connection closed")]
struct ConnectionClosed;

/// Handle the full lifecycle of a chat bridge WebSocket connection.
///
/// Every text frame carries one relayed chat message; recognised commands are
/// answered on the same socket.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let session = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps replies flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    info!(%session, "chat bridge connected");

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match BridgeInboundMessage::from_json_str(&text) {
                Ok(Some((message, message_id))) => {
                    let Some(reply) = chat_service::handle_message(&state, &message).await else {
                        continue;
                    };
                    let frame = BridgeOutboundMessage::Reply {
                        chat: message.chat,
                        in_reply_to: message_id,
                        text: reply,
                    };
                    if send_frame(&outbound_tx, &frame).is_err() {
                        info!(%session, "connection closed while replying, terminating");
                        break;
                    }
                }
                Ok(None) => {
                    debug!(%session, "ignoring unknown bridge frame type");
                }
                Err(err) => {
                    warn!(%session, error = %err, "failed to parse or validate bridge frame");
                }
            },
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(%session, "chat bridge closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(%session, error = %err, "websocket error");
                break;
            }
        }
    }

    info!(%session, "chat bridge disconnected");
    finalize(writer_task, outbound_tx).await;
}

/// Serialize a frame and queue it on the writer channel.
///
/// Serialization failures are logged and swallowed; only a closed writer is
/// reported to the caller.
fn send_frame<T>(tx: &mpsc::UnboundedSender<Message>, value: &T) -> Result<(), ConnectionClosed>
where
    T: ?Sized + serde::Serialize + std::fmt::Debug,
{
    let payload = match serde_json::to_string(value) {
        Ok(p) => p,
        Err(err) => {
            warn!(error = %err, "failed to serialize frame `{value:?}`");
            return Ok(());
        }
    };

    tx.send(Message::Text(payload.into()))
        .map_err(|_| ConnectionClosed)
}

async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}

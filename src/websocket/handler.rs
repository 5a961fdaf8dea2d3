//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and answers each `select` message
//! with the recomputed view. Messages on one connection are processed
//! in order, one at a time.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;

use super::messages::ServerMessage;
use crate::api::AppState;
use crate::dataset::Dataset;

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let dataset = Arc::clone(&state.dataset);
    ws.on_upgrade(move |socket| handle_socket(socket, dataset))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, dataset: Arc<Dataset>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();

    tracing::debug!(connection_id = %connection_id, "WebSocket connected");

    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
        default_region: dataset.first_region().map(str::to_string),
    };
    if !send(&mut sender, &connected).await {
        tracing::debug!(connection_id = %connection_id, "Failed to send connected message");
        return;
    }

    while let Some(result) = receiver.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "WebSocket receive error"
                );
                break;
            }
        };

        let reply = match step(message, &dataset) {
            Step::Reply(reply) => reply,
            Step::Skip => continue,
            Step::Close => {
                tracing::debug!(connection_id = %connection_id, "Client requested close");
                break;
            }
        };

        if !send(&mut sender, &reply).await {
            tracing::debug!(
                connection_id = %connection_id,
                "WebSocket send failed, closing connection"
            );
            break;
        }
    }

    tracing::debug!(connection_id = %connection_id, "WebSocket disconnected");
}

/// What the connection loop does with one incoming frame
#[derive(Debug)]
enum Step {
    Reply(ServerMessage),
    Skip,
    Close,
}

fn step(message: Message, dataset: &Dataset) -> Step {
    match message {
        Message::Text(text) => Step::Reply(ServerMessage::reply_to_text(&text, dataset)),
        Message::Binary(_) => Step::Reply(ServerMessage::Error {
            message: "Binary messages not supported".to_string(),
        }),
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => Step::Skip,
        Message::Close(_) => Step::Close,
    }
}

/// Serialize and send a message. Returns false once the socket is gone.
async fn send(sender: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> bool {
    let text = match serde_json::to_string(message) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            return true;
        }
    };

    sender.send(Message::Text(text)).await.is_ok()
}

//! WebSocket Message Types
//!
//! Defines the message types exchanged between the dashboard page and
//! the server over `/ws`.

use serde::{Deserialize, Serialize};

use crate::api::dto::ViewResponse;
use crate::dataset::Dataset;
use crate::view::{on_selection_changed, Series, Snapshot};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The user picked a new region
    Select {
        /// Newly selected region key
        region: String,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
        /// Initial selection
        default_region: Option<String>,
    },
    /// Recomputed views for a selection
    View {
        region: String,
        title: String,
        series: Series,
        snapshot: Snapshot,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl From<ViewResponse> for ServerMessage {
    fn from(view: ViewResponse) -> Self {
        ServerMessage::View {
            region: view.region,
            title: view.title,
            series: view.series,
            snapshot: view.snapshot,
        }
    }
}

impl ServerMessage {
    /// Answer a parsed client message
    pub fn reply_to(message: ClientMessage, dataset: &Dataset) -> Self {
        match message {
            ClientMessage::Select { region } => {
                let view = on_selection_changed(dataset, &region);
                ViewResponse::new(region, view).into()
            }
            ClientMessage::Ping => ServerMessage::Pong,
        }
    }

    /// Answer raw message text; malformed input gets an error reply
    pub fn reply_to_text(text: &str, dataset: &Dataset) -> Self {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => Self::reply_to(message, dataset),
            Err(e) => ServerMessage::Error {
                message: format!("Invalid message format: {}", e),
            },
        }
    }
}

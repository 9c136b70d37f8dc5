//! WebSocket fan-out of quotation change events.
//!
//! Each connection gets its own subscription to the store's change feed
//! and a forward loop that pushes every event as one JSON text frame.
//! There is no handshake payload on connect, and no queueing or replay: a
//! connection that subscribes after an event was emitted never sees it,
//! and a lagging connection loses the overrun events. Clients recover
//! full consistency on their next fetch of the collection.
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use quotation_common::ChangeEvent;

use crate::store::QuotationStore;

/// WebSocket upgrade handler; subscribes the connection to the change feed.
pub async fn ws_handler(State(store): State<QuotationStore>, ws: WebSocketUpgrade) -> Response {
    let events = store.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, events))
}

async fn handle_socket(socket: WebSocket, mut events: broadcast::Receiver<ChangeEvent>) {
    info!("WebSocket client connected");
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(e) => {
                            error!("Failed to serialize change event: {}", e);
                            continue;
                        }
                    };
                    debug!("Pushing {} event for {}", event.operation_type, event.id());
                    if sender.send(Message::Text(payload)).await.is_err() {
                        // Client is gone; the closing handshake already failed.
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!("WebSocket client lagged, {} change events dropped", missed);
                }
                Err(RecvError::Closed) => {
                    error!("Change feed closed; live updates stop until restart");
                    break;
                }
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("WebSocket receive error: {}", e);
                    break;
                }
            },
        }
    }
    info!("WebSocket client disconnected");
}

//! Background listener for live change events.
//!
//! Connects to the server's WebSocket endpoint and forwards every decoded
//! `ChangeEvent` into a channel the main loop consumes. The stream is
//! best-effort: on any transport error the thread logs and exits without
//! reconnecting, and the next full fetch restores consistency.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;
use log::{debug, error, info};
use tungstenite::Message;

use quotation_common::ChangeEvent;

/// Spawner for the listener thread.
pub struct LiveUpdateListener;

impl LiveUpdateListener {
    /// Spawns a thread that reads change events from `socket_url` and
    /// forwards them to `events_tx` until the stream or the receiver goes
    /// away.
    pub fn start(
        socket_url: String,
        events_tx: Sender<ChangeEvent>,
        shutdown: Arc<AtomicBool>,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            let (mut socket, _response) = match tungstenite::connect(socket_url.as_str()) {
                Ok(connected) => connected,
                Err(e) => {
                    error!(
                        "Failed to connect to live update stream at {}: {}",
                        socket_url, e
                    );
                    return;
                }
            };
            info!("Listening for live updates on {}", socket_url);

            while !shutdown.load(Ordering::Relaxed) {
                match socket.read() {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ChangeEvent>(&text) {
                        Ok(event) => {
                            if events_tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(e) => debug!("Ignoring non-event frame: {}", e),
                    },
                    Ok(Message::Close(_)) => {
                        info!("Live update stream closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        // No reconnection; live updates stop until the next run.
                        error!("Live update stream error: {}", e);
                        break;
                    }
                }
            }
            info!("Live update listener stopping...");
        })
    }
}

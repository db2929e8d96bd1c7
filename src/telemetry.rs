use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_tungstenite::accept_async;
use tracing::{info, error, warn};
use tungstenite::Message;

use crate::config::TelemetryConfig;
use crate::presenter::{DashboardFrame, Presenter};

/// Pushes every dashboard frame as JSON to connected WebSocket clients.
pub struct TelemetryServer {
    tx: broadcast::Sender<String>,
    local_addr: Option<SocketAddr>,
}

impl TelemetryServer {
    /// Binds the listener if enabled. A bind failure is logged and leaves the
    /// server disabled rather than stopping the dashboard.
    pub async fn start(cfg: &TelemetryConfig) -> Self {
        // Ring buffer: slow clients get Lagged and skip frames, the sender never blocks.
        let (tx, _rx) = broadcast::channel(64);

        if !cfg.enabled {
            info!("📡 [Telemetry] Disabled by config.");
            return Self { tx, local_addr: None };
        }

        let addr = format!("127.0.0.1:{}", cfg.port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("❌ [Telemetry] Failed to bind {}: {}", addr, e);
                return Self { tx, local_addr: None };
            }
        };
        let local_addr = listener.local_addr().ok();
        info!("📡 [Telemetry] Server running on ws://{}", local_addr.map_or(addr, |a| a.to_string()));

        let tx_clone = tx.clone();
        tokio::spawn(async move {
            while let Ok((stream, peer)) = listener.accept().await {
                info!("📡 [Telemetry] Client connected: {}", peer);
                let tx_inner = tx_clone.clone();
                tokio::spawn(async move {
                    handle_connection(stream, tx_inner).await;
                });
            }
        });

        Self { tx, local_addr }
    }

    /// Address the listener is bound to, `None` when disabled.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

impl Presenter for TelemetryServer {
    fn render(&self, frame: &DashboardFrame) {
        if self.local_addr.is_none() {
            return;
        }

        // Serialize only when someone is listening.
        if self.tx.receiver_count() > 0 {
            match serde_json::to_string(frame) {
                Ok(msg) => {
                    let _ = self.tx.send(msg);
                }
                Err(e) => warn!("[Telemetry] Failed to serialize frame: {}", e),
            }
        }
    }
}

async fn handle_connection(stream: tokio::net::TcpStream, tx: broadcast::Sender<String>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake failed: {}", e);
            return;
        }
    };

    let (mut ws_sender, _ws_receiver) = ws_stream.split();
    let mut rx = tx.subscribe();

    loop {
        match rx.recv().await {
            Ok(msg) => {
                if ws_sender.send(Message::Text(msg.into())).await.is_err() {
                    // client went away
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

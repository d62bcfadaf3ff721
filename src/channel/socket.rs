//! Reconnecting WebSocket subscriber

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Receiver of text frames from a push channel
#[async_trait]
pub trait PushHandler: Send + Sync {
    /// Channel name used in logs
    fn channel(&self) -> &str;

    /// Handle one text frame
    async fn on_message(&self, text: &str);
}

/// WebSocket subscription that reconnects after a fixed delay, forever.
///
/// There is no backoff growth and no attempt cap; the loop ends only when the
/// shutdown signal fires or its sender is dropped.
pub struct ReconnectingSocket {
    url: String,
    reconnect_delay: Duration,
    handler: Arc<dyn PushHandler>,
    connections: Arc<AtomicU64>,
}

impl ReconnectingSocket {
    pub fn new(url: impl Into<String>, reconnect_delay: Duration, handler: Arc<dyn PushHandler>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
            handler,
            connections: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared counter of successful connections
    pub fn connection_counter(&self) -> Arc<AtomicU64> {
        self.connections.clone()
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let channel = self.handler.channel().to_string();

        loop {
            if *shutdown.borrow() {
                break;
            }

            // Shutdown wins even if the upgrade never completes
            let connected = tokio::select! {
                result = tokio_tungstenite::connect_async(self.url.as_str()) => result,
                _ = shutdown.changed() => {
                    debug!(channel = %channel, "Push channel shut down while connecting");
                    return;
                }
            };

            match connected {
                Ok((mut stream, _)) => {
                    let count = self.connections.fetch_add(1, Ordering::SeqCst) + 1;
                    info!(channel = %channel, url = %self.url, connections = count, "Push channel connected");

                    loop {
                        tokio::select! {
                            _ = shutdown.changed() => {
                                let _ = stream.close(None).await;
                                debug!(channel = %channel, "Push channel shut down");
                                return;
                            }
                            frame = stream.next() => match frame {
                                Some(Ok(Message::Text(text))) => {
                                    self.handler.on_message(&text).await;
                                }
                                Some(Ok(Message::Close(_))) | None => {
                                    info!(channel = %channel, "Push channel closed by server");
                                    break;
                                }
                                Some(Ok(_)) => {}
                                Some(Err(e)) => {
                                    warn!(channel = %channel, error = %e, "Push channel read failed");
                                    break;
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(channel = %channel, url = %self.url, error = %e, "Push channel connect failed");
                }
            }

            debug!(
                channel = %channel,
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "Reconnecting push channel"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.reconnect_delay) => {}
                _ = shutdown.changed() => break,
            }
        }
    }
}

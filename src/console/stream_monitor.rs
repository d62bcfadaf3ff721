//! Stream control and the reconciled stream status

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::client::ApiClient;
use crate::api::models::{StatusResponse, StreamStartRequest};
use crate::console::preferences::Preferences;
use crate::error::{AppError, Result};

/// Where a status observation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSource {
    Poll,
    Push,
}

/// One status reading, stamped with the instant its request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub running: bool,
    /// false when the status endpoint could not be reached
    pub reachable: bool,
    pub requested_at: Instant,
    pub source: StatusSource,
}

impl Observation {
    pub fn poll(running: bool, requested_at: Instant) -> Self {
        Self {
            running,
            reachable: true,
            requested_at,
            source: StatusSource::Poll,
        }
    }

    pub fn unreachable(requested_at: Instant) -> Self {
        Self {
            running: false,
            reachable: false,
            requested_at,
            source: StatusSource::Poll,
        }
    }

    pub fn push(running: bool) -> Self {
        Self {
            running,
            reachable: true,
            requested_at: Instant::now(),
            source: StatusSource::Push,
        }
    }
}

/// Reconciled stream state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamState {
    pub running: bool,
    pub reachable: bool,
    pub last: Option<Observation>,
}

impl StreamState {
    pub fn label(&self) -> &'static str {
        if self.running {
            "ON AIR"
        } else {
            "OFFLINE"
        }
    }
}

/// What to stream to: a bare key or a full ingest URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTarget {
    pub target: String,
    pub backup_rtmp_url: Option<String>,
}

/// Build the start request. A bare key is appended to `rtmp_prefix`; a value
/// that already is an `rtmp://` or `rtmps://` URL is sent as-is.
pub fn resolve_target(target: &StreamTarget, rtmp_prefix: &str) -> Result<StreamStartRequest> {
    let value = target.target.trim();
    if value.is_empty() {
        return Err(AppError::InvalidRequest(
            "Please enter your Stream Key".to_string(),
        ));
    }

    let backup_rtmp_url = match target.backup_rtmp_url.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(url) if is_ingest_url(url) => Some(url.to_string()),
        Some(url) => {
            return Err(AppError::InvalidRequest(format!(
                "Backup URL must be rtmp:// or rtmps://: {}",
                url
            )))
        }
    };

    if is_ingest_url(value) {
        return Ok(StreamStartRequest {
            rtmp_url: Some(value.to_string()),
            stream_key: None,
            backup_rtmp_url,
        });
    }

    Ok(StreamStartRequest {
        rtmp_url: Some(format!("{}{}", rtmp_prefix, value)),
        stream_key: Some(value.to_string()),
        backup_rtmp_url,
    })
}

fn is_ingest_url(value: &str) -> bool {
    value.starts_with("rtmp://") || value.starts_with("rtmps://")
}

/// Single source of truth for whether the stream is on air.
///
/// Poll results and pushed status events both go through [`StreamMonitor::observe`];
/// an observation whose request was issued before the last applied one is
/// dropped, so a slow response can never overwrite a newer reading.
pub struct StreamMonitor {
    client: ApiClient,
    preferences: Arc<Preferences>,
    rtmp_prefix: String,
    recheck_delay: Duration,
    state: watch::Sender<StreamState>,
}

impl StreamMonitor {
    pub fn new(
        client: ApiClient,
        preferences: Arc<Preferences>,
        rtmp_prefix: impl Into<String>,
        recheck_delay: Duration,
    ) -> Self {
        let (state, _) = watch::channel(StreamState::default());
        Self {
            client,
            preferences,
            rtmp_prefix: rtmp_prefix.into(),
            recheck_delay,
            state,
        }
    }

    pub fn current(&self) -> StreamState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<StreamState> {
        self.state.subscribe()
    }

    /// Apply an observation unless it is older than the last applied one.
    /// Subscribers are notified only when `running` or `reachable` changes.
    pub fn observe(&self, observation: Observation) -> bool {
        let mut applied = false;

        self.state.send_if_modified(|state| {
            if let Some(last) = state.last {
                if observation.requested_at < last.requested_at {
                    return false;
                }
            }

            let changed =
                state.running != observation.running || state.reachable != observation.reachable;
            state.running = observation.running;
            state.reachable = observation.reachable;
            state.last = Some(observation);
            applied = true;
            changed
        });

        if !applied {
            debug!(source = ?observation.source, "Dropped stale status observation");
        }
        applied
    }

    /// Query the status endpoint once. A failed query counts as offline.
    pub async fn check(&self) -> StreamState {
        let requested_at = Instant::now();

        let observation = match self.client.stream_status().await {
            Ok(status) => Observation::poll(status.running, requested_at),
            Err(e) => {
                warn!(error = %e, "Status check failed");
                Observation::unreachable(requested_at)
            }
        };

        self.observe(observation);
        self.current()
    }

    /// Start streaming. The key (if one was given) is remembered locally and a
    /// status re-check is scheduled shortly after.
    pub async fn start(self: &Arc<Self>, target: &StreamTarget) -> Result<StatusResponse> {
        let request = resolve_target(target, &self.rtmp_prefix)?;

        if let Some(key) = &request.stream_key {
            if let Err(e) = self.preferences.set_stream_key(key) {
                warn!(error = %e, "Failed to remember stream key");
            }
        }

        let ack = self.client.start_stream(&request).await?;
        self.schedule_recheck();
        Ok(ack)
    }

    /// Start with the last remembered key
    pub async fn start_with_saved_key(self: &Arc<Self>) -> Result<StatusResponse> {
        let key = self.preferences.stream_key().ok_or_else(|| {
            AppError::InvalidRequest("No stream key has been saved yet".to_string())
        })?;

        self.start(&StreamTarget {
            target: key,
            backup_rtmp_url: None,
        })
        .await
    }

    pub async fn stop(self: &Arc<Self>) -> Result<StatusResponse> {
        let ack = self.client.stop_stream().await?;
        self.schedule_recheck();
        Ok(ack)
    }

    pub fn schedule_recheck(self: &Arc<Self>) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(monitor.recheck_delay).await;
            monitor.check().await;
        })
    }

    /// Poll the status endpoint every `interval` until shutdown
    pub fn spawn_poller(
        self: &Arc<Self>,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_ms = interval.as_millis() as u64, "Stream status poller started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        monitor.check().await;
                    }
                    _ = shutdown.changed() => break,
                }
            }

            debug!("Stream status poller stopped");
        })
    }
}

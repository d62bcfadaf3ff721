//! Bounded view of the server log stream

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Keeps the newest `capacity` log lines; older lines are evicted first
pub struct LogBuffer {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
    received: AtomicU64,
    live: broadcast::Sender<String>,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (live, _) = broadcast::channel(capacity);
        Self {
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            received: AtomicU64::new(0),
            live,
        }
    }

    /// Append a line; returns true when the oldest line was evicted
    pub fn push(&self, line: impl Into<String>) -> bool {
        let line = line.into();
        let evicted = {
            let mut lines = self.lines.lock();
            let evicted = if lines.len() >= self.capacity {
                lines.pop_front();
                true
            } else {
                false
            };
            lines.push_back(line.clone());
            evicted
        };

        self.received.fetch_add(1, Ordering::Relaxed);
        // No subscribers is fine
        let _ = self.live.send(line);
        evicted
    }

    /// Lines currently held, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().iter().cloned().collect()
    }

    /// Live feed of lines pushed after subscribing
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.live.subscribe()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines received since creation, including evicted ones
    pub fn total_received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(50)
    }
}

use crate::domain::ports::SessionObserver;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Expired,
}

/// Fans session events out to any number of subscribers and tracks whether
/// a logout is in progress.
pub struct SessionBroadcaster {
    sender: broadcast::Sender<SessionEvent>,
    logging_out: AtomicBool,
}

impl SessionBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            logging_out: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn begin_logout(&self) {
        self.logging_out.store(true, Ordering::SeqCst);
    }

    pub fn end_logout(&self) {
        self.logging_out.store(false, Ordering::SeqCst);
    }
}

impl Default for SessionBroadcaster {
    fn default() -> Self {
        Self::new(16)
    }
}

impl SessionObserver for SessionBroadcaster {
    fn session_expired(&self) {
        // No subscribers is fine.
        if self.sender.send(SessionEvent::Expired).is_err() {
            tracing::debug!("Session expired with no subscribers listening");
        }
    }

    fn is_logging_out(&self) -> bool {
        self.logging_out.load(Ordering::SeqCst)
    }
}

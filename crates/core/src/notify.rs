//! User-facing success notifications ("toasts").

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::Serialize;

/// Receives a plain message after a create or edit is committed.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Toasts kept when nobody drains the queue.
pub const DEFAULT_TOAST_CAPACITY: usize = 32;

/// Pending toasts, handed out once by [`ToastQueue::drain`].
///
/// Holds at most `capacity` toasts; pushing past it drops the oldest.
#[derive(Debug)]
pub struct ToastQueue {
    pending: Mutex<VecDeque<Toast>>,
    capacity: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TOAST_CAPACITY)
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bounded to `capacity` toasts (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn success(&self, message: &str) {
        tracing::debug!(message, "Queued success toast");
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if pending.len() == self.capacity {
            if let Some(dropped) = pending.pop_front() {
                tracing::debug!(message = %dropped.message, "Dropped undrained toast");
            }
        }
        pending.push_back(Toast {
            level: ToastLevel::Success,
            message: message.to_string(),
        });
    }
}

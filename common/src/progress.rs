use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receives a human readable status line, e.g. `reading tag 'Motor.Speed'`.
pub type OnProgress<'a> = Option<&'a (dyn Fn(&str) + Send + Sync)>;

/// Receives a status line and whether it reports a success.
pub type OnWriteProgress<'a> = Option<&'a (dyn Fn(&str, bool) + Send + Sync)>;

/// Cooperative stop flag shared between an operator and a running batch.
///
/// Batches check it between tags; once triggered it stays triggered.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    triggered: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

pub fn notify(on_progress: OnProgress<'_>, message: &str) {
    if let Some(callback) = on_progress {
        callback(message);
    }
}

pub fn notify_outcome(on_progress: OnWriteProgress<'_>, message: &str, good: bool) {
    if let Some(callback) = on_progress {
        callback(message, good);
    }
}

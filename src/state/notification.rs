#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Epoch milliseconds after which the toast is dropped; `None` stays
    /// until dismissed.
    pub close_at_ms: Option<u64>,
}

/// State management for toasts
#[derive(Debug, Default)]
pub struct NotificationState {
    pub current: Option<Toast>,
}

impl NotificationState {
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, duration_ms: Option<u64>, now_ms: u64) {
        self.current = Some(Toast {
            message: message.into(),
            kind,
            close_at_ms: duration_ms.map(|d| now_ms.saturating_add(d)),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn should_close(&self, now_ms: u64) -> bool {
        matches!(&self.current, Some(Toast { close_at_ms: Some(at), .. }) if now_ms >= *at)
    }

    /// Drops an expired toast. Returns whether one was dropped.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if self.should_close(now_ms) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

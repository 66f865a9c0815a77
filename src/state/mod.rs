pub mod achievements;
pub mod auth;
pub mod chat;
pub mod compose;
pub mod filter;
pub mod listing;
pub mod login_attempts;
pub mod modal;
pub mod notification;
pub mod session;
pub mod signup;
pub mod ui;

pub use achievements::{AchievementsState, TradeStats};
pub use auth::{AuthState, LoginField, LoginOutcome, UserProfile};
pub use chat::{ChannelId, ChatState};
pub use compose::MessageDraft;
pub use filter::FilterState;
pub use listing::{ListingDraft, ListingForm};
pub use login_attempts::{AttemptsStatus, LockoutPolicy, LoginAttempts};
pub use modal::{ModalCoordinator, ModalKind, ModalState, SellerProfile};
pub use notification::{NotificationState, Toast, ToastKind};
pub use session::{SessionGuard, SessionPhase, SessionPolicy};
pub use signup::SignupWizard;
pub use ui::{AppMode, BoardFocus, UiState};

use std::time::Duration;

use crate::storage::StorageError;

/// Configuration constants for the application
pub struct AppConfig {
    pub tick_rate: Duration,
    pub session_check_interval: Duration,
    pub login_delay: Duration,
    pub nickname_check_delay: Duration,
    pub message_send_delay: Duration,
    pub deals_load_delay: Duration,
    pub toast_duration_ms: u64,
    pub popular_deals: usize,
    pub page_buttons: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(50),
            session_check_interval: Duration::from_secs(1),
            login_delay: Duration::from_secs(1),
            nickname_check_delay: Duration::from_secs(2),
            message_send_delay: Duration::from_secs(1),
            deals_load_delay: Duration::from_millis(1500),
            toast_duration_ms: 3000,
            popular_deals: 5,
            page_buttons: 5,
        }
    }
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Countdown text: minutes rounded up, "N min" below an hour and
/// "H h M min" from an hour up.
pub fn format_remaining(ms: u64) -> String {
    let minutes = ms.div_ceil(60_000);
    if minutes >= 60 {
        format!("{} h {} min", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} min")
    }
}

/// Elapsed-time text: whole minutes, "H h M min" once past an hour.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let hours = minutes / 60;
    if hours > 0 {
        format!("{hours} h {} min", minutes % 60)
    } else {
        format!("{minutes} min")
    }
}

// src/app.rs

use chrono::{DateTime, Local, NaiveTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::deferred::{DeferredQueue, Lifecycle, ViewId};
use crate::mock_data;
use crate::model::{Deal, DealType};
use crate::prefs::Prefs;
use crate::state::{
    AchievementsState, AppConfig, AppMode, AuthState, ChannelId, ChatState, ListingForm, LoginAttempts,
    LoginOutcome, MessageDraft, ModalKind, NotificationState, SessionGuard, SessionPhase, SellerProfile,
    SignupWizard, ToastKind, UiState,
};
use crate::storage::{self, SharedStore, LAST_LOGIN_TIME_KEY};
use crate::store::MainStore;

/// Continuations that fire after a simulated backend delay.
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredAction {
    CompleteLogin,
    CompleteNicknameCheck,
    SendMessage(String),
    FinishDealsLoad,
}

pub struct App {
    pub ui: UiState,
    pub auth: AuthState,
    pub signup: SignupWizard,
    pub attempts: LoginAttempts,
    pub session: SessionGuard,
    pub store: MainStore,
    pub sell_form: ListingForm,
    pub buy_form: ListingForm,
    pub compose: MessageDraft,
    pub chat: ChatState,
    pub achievements: AchievementsState,
    pub notifications: NotificationState,
    pub config: AppConfig,
    pub prefs: Prefs,

    clock: SharedClock,
    storage: SharedStore,
    lifecycle: Lifecycle,
    deferred: DeferredQueue<DeferredAction>,
    last_session_check_ms: u64,
}

impl App {
    pub fn new(prefs: Prefs, clock: SharedClock, storage: SharedStore) -> Self {
        let attempts = LoginAttempts::new(prefs.lockout_policy(), clock.clone(), storage.clone());
        let session = SessionGuard::new(prefs.session_policy(), clock.clone(), storage.clone());
        let mut store = MainStore::new(prefs.items_per_page);
        store.subscribe(|change| debug!(?change, "store changed"));

        let mut lifecycle = Lifecycle::new();
        lifecycle.mount(ViewId::Login);
        let now = clock.now_ms();

        let mut app = App {
            ui: UiState::default(),
            auth: AuthState::default(),
            signup: SignupWizard::default(),
            attempts,
            session,
            store,
            sell_form: ListingForm::new(DealType::Sell),
            buy_form: ListingForm::new(DealType::Buy),
            compose: MessageDraft::default(),
            chat: ChatState::new(storage.clone()),
            achievements: AchievementsState::default(),
            notifications: NotificationState::default(),
            config: AppConfig::default(),
            prefs,
            clock,
            storage,
            lifecycle,
            deferred: DeferredQueue::new(),
            last_session_check_ms: now,
        };
        app.auth.last_login = app.load_last_login();

        // A session restored from storage skips the login form.
        if app.session.is_active() {
            info!("resuming stored session");
            app.enter_board(None);
        }
        app
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms() as i64).unwrap_or_default()
    }

    fn local_time(&self) -> NaiveTime {
        self.now_utc().with_timezone(&Local).time()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn pending_actions(&self) -> usize {
        self.deferred.len()
    }

    pub fn set_notification(&mut self, message: impl Into<String>, kind: ToastKind) {
        let now = self.now_ms();
        self.notifications.show(message, kind, Some(self.config.toast_duration_ms), now);
    }

    fn schedule(&mut self, view: ViewId, delay: std::time::Duration, action: DeferredAction) {
        let Some(token) = self.lifecycle.token(view) else {
            warn!(?view, ?action, "scheduling from a view that is not mounted");
            return;
        };
        let now = self.now_ms();
        self.deferred.schedule(now, delay, token, action);
    }

    // --- views ---

    fn view_for(mode: AppMode) -> ViewId {
        match mode {
            AppMode::Login => ViewId::Login,
            AppMode::Signup => ViewId::Signup,
            AppMode::Board | AppMode::Achievements => ViewId::Board,
        }
    }

    /// Switches the top-level view, dismounting the old one so its pending
    /// continuations are dropped.
    pub fn switch_mode(&mut self, mode: AppMode) {
        let (from, to) = (Self::view_for(self.ui.mode), Self::view_for(mode));
        if from != to {
            self.lifecycle.dismount(from);
            self.lifecycle.mount(to);
        }
        if self.ui.mode != mode {
            debug!(?mode, "mode changed");
        }
        self.ui.set_mode(mode);
    }

    pub fn open_signup(&mut self) {
        self.auth.cancel_pending();
        self.auth.clear_inputs();
        self.signup.reset();
        self.switch_mode(AppMode::Signup);
    }

    pub fn back_to_login(&mut self) {
        self.signup.reset();
        self.switch_mode(AppMode::Login);
    }

    // --- login ---

    pub fn submit_login(&mut self) {
        match self.auth.submit(&mut self.attempts) {
            LoginOutcome::Accepted => {
                let delay = self.config.login_delay;
                self.schedule(ViewId::Login, delay, DeferredAction::CompleteLogin);
            }
            LoginOutcome::Locked => {
                let text = self.attempts.remaining_time_text();
                self.set_notification(format!("Login locked for {text}."), ToastKind::Error);
            }
            LoginOutcome::Rejected | LoginOutcome::Busy => {}
        }
    }

    fn complete_login(&mut self) {
        let profile = self.auth.complete_login();
        self.session.start_session();
        let previous = self.auth.last_login;
        self.store_last_login();
        self.enter_board(previous);
        self.store.set_user(profile.nickname.clone(), profile.company.clone());
        self.set_notification(format!("Welcome, {}!", profile.nickname), ToastKind::Success);
    }

    fn enter_board(&mut self, previous_login: Option<DateTime<Utc>>) {
        self.auth.last_login = previous_login.or(self.auth.last_login);
        if self.auth.current_user.is_none() {
            self.store.set_user(crate::state::auth::DEMO_NICKNAME, mock_data::DEFAULT_COMPANY_NAME);
        }
        self.switch_mode(AppMode::Board);
        // Repeat loads are ignored by the store, so a stale schedule is harmless.
        if !self.store.deals_loaded() {
            self.store.set_loading(true);
            let delay = self.config.deals_load_delay;
            self.schedule(ViewId::Board, delay, DeferredAction::FinishDealsLoad);
        }
    }

    fn load_last_login(&self) -> Option<DateTime<Utc>> {
        let raw: String = storage::load_json(self.storage.as_ref(), LAST_LOGIN_TIME_KEY)?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(e) => {
                warn!(error = %e, "ignoring malformed last login time");
                None
            }
        }
    }

    fn store_last_login(&self) {
        let now = self.now_utc().to_rfc3339();
        storage::save_json(self.storage.as_ref(), LAST_LOGIN_TIME_KEY, &now);
    }

    pub fn logout(&mut self) {
        self.session.end_session();
        self.leave_board();
    }

    fn leave_board(&mut self) {
        self.auth.logout();
        self.store.clear_user();
        self.store.close_all_modals();
        self.lifecycle.dismount(ViewId::MessageCompose);
        self.compose.clear();
        self.chat.reset();
        self.sell_form.reset();
        self.buy_form.reset();
        self.switch_mode(AppMode::Login);
    }

    /// Any key press while logged in counts as activity.
    pub fn touch_session(&mut self) {
        if self.session.is_active() {
            self.session.update_activity();
        }
    }

    pub fn extend_session(&mut self) {
        if self.session.extend_session() {
            self.set_notification("Session extended.", ToastKind::Info);
        }
    }

    // --- signup ---

    pub fn signup_next(&mut self) {
        use crate::state::signup::SignupAdvance;

        match self.signup.next() {
            SignupAdvance::CheckNickname => {
                let delay = self.config.nickname_check_delay;
                self.schedule(ViewId::Signup, delay, DeferredAction::CompleteNicknameCheck);
            }
            SignupAdvance::Finished => {
                self.back_to_login();
                self.set_notification("Account created. Please log in.", ToastKind::Success);
            }
            SignupAdvance::Moved | SignupAdvance::Invalid => {}
        }
    }

    // --- board ---

    pub fn selected_deal(&self) -> Option<Deal> {
        self.store.page().items.into_iter().nth(self.ui.selected_row)
    }

    pub fn open_sell(&mut self) {
        self.sell_form.reset();
        self.open_modal(|store| store.open_sell());
    }

    pub fn open_buy(&mut self) {
        self.buy_form.reset();
        self.open_modal(|store| store.open_buy());
    }

    pub fn open_seller(&mut self) {
        if let Some(deal) = self.selected_deal() {
            let profile = SellerProfile::from(&deal);
            self.open_modal(|store| store.open_seller(profile));
        }
    }

    pub fn open_message(&mut self) {
        if let Some(deal) = self.selected_deal() {
            self.compose.clear();
            self.open_modal(|store| store.open_message(deal));
            self.lifecycle.mount(ViewId::MessageCompose);
        }
    }

    fn open_modal(&mut self, open: impl FnOnce(&mut MainStore)) {
        // Opening any modal replaces the compose modal, if it was up.
        self.lifecycle.dismount(ViewId::MessageCompose);
        open(&mut self.store);
    }

    pub fn close_modal(&mut self) {
        let Some(kind) = self.store.modals().state().kind() else {
            return;
        };
        if kind == ModalKind::Message {
            self.lifecycle.dismount(ViewId::MessageCompose);
            self.compose.clear();
        }
        self.store.close_modal(kind);
    }

    pub fn submit_listing(&mut self, kind: DealType) {
        let form = match kind {
            DealType::Sell => &mut self.sell_form,
            DealType::Buy => &mut self.buy_form,
        };
        let Some(draft) = form.submit() else {
            return;
        };
        let listing_id = Uuid::new_v4();
        info!(%listing_id, kind = ?draft.kind, points = draft.points, price = draft.price, "listing posted");
        self.close_modal();

        let now = self.now_utc();
        let completions = self.achievements.record_trade(draft.price, now);
        let verb = match kind {
            DealType::Sell => "Sell",
            DealType::Buy => "Buy",
        };
        match completions.first() {
            Some(done) => self.set_notification(
                format!("{verb} listing posted. Achievement unlocked: {}", done.achievement_name),
                ToastKind::Success,
            ),
            None => self.set_notification(format!("{verb} listing posted."), ToastKind::Success),
        }
    }

    pub fn send_message(&mut self) {
        let Some(text) = self.compose.begin_send() else {
            return;
        };
        let delay = self.config.message_send_delay;
        self.schedule(ViewId::MessageCompose, delay, DeferredAction::SendMessage(text));
    }

    pub fn send_chat(&mut self) {
        let nickname = self.store.user_nickname().to_string();
        let at = self.local_time();
        self.chat.send_input(&nickname, at);
    }

    // --- ticks ---

    pub fn on_tick(&mut self) {
        self.ui.tick();
        let now = self.now_ms();
        self.notifications.expire(now);

        let interval = self.config.session_check_interval.as_millis() as u64;
        if now.saturating_sub(self.last_session_check_ms) >= interval {
            self.last_session_check_ms = now;
            self.check_session();
        }

        for action in self.deferred.drain_due(now, &self.lifecycle) {
            self.run_deferred(action);
        }
    }

    fn check_session(&mut self) {
        if self.ui.mode == AppMode::Login || self.ui.mode == AppMode::Signup {
            return;
        }
        let before = self.session.phase();
        if self.session.check_status() != SessionPhase::Expired || before == SessionPhase::Expired {
            return;
        }
        if self.session.policy().auto_logout {
            self.leave_board();
            self.set_notification("Session expired. Please log in again.", ToastKind::Warning);
        } else {
            // Stays up until dismissed; the board offers extend or logout.
            let now = self.now_ms();
            self.notifications.show("Session expired. Press e to extend or o to log out.", ToastKind::Warning, None, now);
        }
    }

    fn run_deferred(&mut self, action: DeferredAction) {
        debug!(?action, "running deferred action");
        match action {
            DeferredAction::CompleteLogin => self.complete_login(),
            DeferredAction::CompleteNicknameCheck => {
                if self.signup.finish_nickname_check() {
                    self.signup.send_verification();
                }
            }
            DeferredAction::SendMessage(text) => {
                let Some(deal) = self.store.modals().selected_deal().cloned() else {
                    return;
                };
                self.compose.clear();
                self.close_modal();
                let nickname = self.store.user_nickname().to_string();
                let at = self.local_time();
                self.chat.add_message(ChannelId::Trade, nickname, format!("@{} {}", deal.seller, text), at);
                self.set_notification(format!("Message sent to {}.", deal.seller), ToastKind::Success);
            }
            DeferredAction::FinishDealsLoad => {
                let today = self.now_utc().date_naive();
                let company = self.store.user_company().to_string();
                self.store.load_deals(mock_data::mock_deals(&company, today));
            }
        }
    }

    pub fn quit(&mut self) {
        self.deferred.clear();
        self.store.dispose();
        self.ui.quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::state::auth::{DEMO_EMAIL, DEMO_PASSWORD};
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn app() -> (App, Arc<ManualClock>, Arc<MemoryStore>) {
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(MemoryStore::new());
        let app = App::new(Prefs::default(), clock.clone(), store.clone());
        (app, clock, store)
    }

    fn run_for(app: &mut App, clock: &ManualClock, ms: u64) {
        for _ in 0..ms / 50 {
            clock.advance(50);
            app.on_tick();
        }
    }

    fn login(app: &mut App, clock: &ManualClock) {
        app.auth.email = DEMO_EMAIL.into();
        app.auth.password = DEMO_PASSWORD.into();
        app.submit_login();
        run_for(app, clock, 1_000);
    }

    #[test]
    fn login_completes_after_delay_and_loads_deals() {
        let (mut app, clock, store) = app();
        app.auth.email = DEMO_EMAIL.into();
        app.auth.password = DEMO_PASSWORD.into();
        app.submit_login();
        assert!(app.auth.is_loading);
        run_for(&mut app, &clock, 500);
        assert_eq!(app.ui.mode, AppMode::Login);

        run_for(&mut app, &clock, 500);
        assert_eq!(app.ui.mode, AppMode::Board);
        assert!(app.session.is_active());
        assert_eq!(app.store.user_company(), "고려해운");
        assert!(store.get(LAST_LOGIN_TIME_KEY).unwrap().is_some());
        assert!(app.store.is_loading());

        run_for(&mut app, &clock, 1_500);
        assert!(app.store.deals_loaded());
        assert_eq!(app.store.deals().len(), 12);
    }

    #[test]
    fn leaving_login_drops_pending_completion() {
        let (mut app, clock, _) = app();
        app.auth.email = DEMO_EMAIL.into();
        app.auth.password = DEMO_PASSWORD.into();
        app.submit_login();
        app.open_signup();
        app.back_to_login();
        run_for(&mut app, &clock, 2_000);
        assert_eq!(app.ui.mode, AppMode::Login);
        assert!(!app.auth.is_logged_in());
        assert_eq!(app.pending_actions(), 0);
    }

    #[test]
    fn closed_compose_never_sends() {
        let (mut app, clock, _) = app();
        login(&mut app, &clock);
        run_for(&mut app, &clock, 1_500);

        app.open_message();
        app.compose.text = "안녕하세요".into();
        app.send_message();
        app.close_modal();
        run_for(&mut app, &clock, 1_500);
        assert!(app.chat.channel_messages(ChannelId::Trade).iter().all(|m| !m.text.contains("안녕하세요")));

        app.open_message();
        app.compose.text = "안녕하세요".into();
        app.send_message();
        run_for(&mut app, &clock, 1_000);
        assert!(!app.store.modals().any_open());
        assert!(app.chat.channel_messages(ChannelId::Trade).iter().any(|m| m.text.contains("안녕하세요")));
    }

    #[test]
    fn idle_session_logs_out() {
        let (mut app, clock, _) = app();
        login(&mut app, &clock);
        clock.advance(30 * 60_000 + 1);
        app.on_tick();
        assert_eq!(app.ui.mode, AppMode::Login);
        assert!(!app.auth.is_logged_in());
        assert!(app.notifications.current.is_some());
    }

    #[test]
    fn stored_session_is_resumed() {
        let (mut first, clock, store) = app();
        login(&mut first, &clock);
        clock.advance(60_000);

        let second = App::new(Prefs::default(), clock.clone(), store.clone());
        assert_eq!(second.ui.mode, AppMode::Board);
        assert!(second.auth.last_login.is_some());
    }

    #[test]
    fn posting_a_listing_records_a_trade() {
        let (mut app, clock, _) = app();
        login(&mut app, &clock);
        app.open_sell();
        app.sell_form.title = "포인트 판매".into();
        app.sell_form.points = "10000".into();
        assert!(app.sell_form.next_step());
        app.sell_form.price = "9000".into();
        assert!(app.sell_form.next_step());
        app.submit_listing(DealType::Sell);

        assert!(!app.store.modals().any_open());
        assert_eq!(app.achievements.trade_stats.total_trades, 1);
        let toast = app.notifications.current.as_ref().unwrap();
        assert!(toast.message.starts_with("Sell listing posted"));
    }
}

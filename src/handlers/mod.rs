pub mod auth;
pub mod board;
pub mod chat;
pub mod modals;
pub mod navigation;

use crate::app::App;
use crate::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Main input handler dispatcher
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Handle quit confirmation dialog
    if app.ui.show_quit_confirm {
        handle_quit_confirm_input(key, app);
        return;
    }

    // Handle global shortcuts first
    if navigation::handle_global_shortcuts(key, app) {
        return;
    }

    // Every key press counts as activity, including ones the warning swallows
    app.touch_session();

    // The session warning blocks the board until answered
    if app.session.show_warning() {
        handle_session_warning_input(key, app);
        return;
    }

    // Check if there's an active notification and close it on any key press
    if app.notifications.current.is_some() {
        app.notifications.clear();
        return; // Consume the key press and don't process further
    }

    if app.store.modals().any_open() {
        modals::handle_modal_input(key, app);
        return;
    }

    match app.ui.mode {
        AppMode::Login | AppMode::Signup => auth::handle_auth_input(key, app),
        AppMode::Board => board::handle_board_input(key, app),
        AppMode::Achievements => navigation::handle_achievements_input(key, app),
    }
}

fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Left | KeyCode::Right => {
            app.ui.quit_confirm_selected = if app.ui.quit_confirm_selected == 0 { 1 } else { 0 };
        }
        KeyCode::Enter => {
            if app.ui.quit_confirm_selected == 0 {
                // Yes - quit the application
                app.quit();
            }
            app.ui.close_quit_confirm();
        }
        KeyCode::Esc => app.ui.close_quit_confirm(),
        // Handle Ctrl+C again to close the dialog
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.ui.close_quit_confirm();
        }
        _ => {}
    }
}

fn handle_session_warning_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('e') => app.extend_session(),
        KeyCode::Char('l') | KeyCode::Esc => app.logout(),
        _ => {}
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::prefs::Prefs;
    use crate::state::auth::{DEMO_EMAIL, DEMO_PASSWORD};
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    pub(crate) fn press(app: &mut App, code: KeyCode) {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app);
    }

    pub(crate) fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    pub(crate) fn logged_in() -> (App, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let mut app = App::new(Prefs::default(), clock.clone(), Arc::new(MemoryStore::new()));
        type_str(&mut app, DEMO_EMAIL);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, DEMO_PASSWORD);
        press(&mut app, KeyCode::Enter);
        for _ in 0..60 {
            clock.advance(50);
            app.on_tick();
        }
        app.notifications.clear();
        (app, clock)
    }

    #[test]
    fn ctrl_c_asks_before_quitting() {
        let (mut app, _) = logged_in();
        handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut app);
        assert!(app.ui.show_quit_confirm);
        press(&mut app, KeyCode::Enter);
        assert!(!app.ui.should_quit);

        handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut app);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert!(app.ui.should_quit);
        assert!(app.store.is_disposed());
    }

    #[test]
    fn toast_swallows_one_key() {
        let (mut app, _) = logged_in();
        app.set_notification("hello", crate::state::ToastKind::Info);
        press(&mut app, KeyCode::Char('n'));
        assert!(app.notifications.current.is_none());
        assert!(!app.store.modals().any_open());
        press(&mut app, KeyCode::Char('n'));
        assert!(app.store.modals().is_open(crate::state::ModalKind::Sell));
    }

    #[test]
    fn warning_can_be_answered_with_extend() {
        let (mut app, clock) = logged_in();
        clock.advance(26 * 60_000);
        clock.advance(1_000);
        app.on_tick();
        assert!(app.session.show_warning());
        press(&mut app, KeyCode::Enter);
        app.on_tick();
        assert!(!app.session.show_warning());
        assert_eq!(app.ui.mode, AppMode::Board);
    }

    #[test]
    fn any_key_during_warning_counts_as_activity() {
        let (mut app, clock) = logged_in();
        clock.advance(26 * 60_000);
        app.on_tick();
        assert!(app.session.show_warning());

        let before = app.session.record().map(|r| r.last_activity);
        press(&mut app, KeyCode::Down);
        assert_ne!(app.session.record().map(|r| r.last_activity), before);
        assert!(app.session.show_warning());

        clock.advance(1_000);
        app.on_tick();
        assert!(!app.session.show_warning());
        assert_eq!(app.ui.mode, AppMode::Board);
    }

    #[test]
    fn expired_session_can_be_extended_from_the_board() {
        let (mut app, clock) = logged_in();
        app.session = crate::state::SessionGuard::new(
            crate::state::SessionPolicy {
                auto_logout: false,
                ..Default::default()
            },
            clock.clone(),
            std::sync::Arc::new(MemoryStore::new()),
        );
        app.session.start_session();
        clock.advance(30 * 60_000 + 1);
        app.on_tick();
        assert!(app.session.is_expired());
        assert_eq!(app.ui.mode, AppMode::Board);

        // The first key dismisses the expiry toast
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('e'));
        assert!(!app.session.is_expired());
        assert_eq!(app.notifications.current.as_ref().map(|t| t.message.as_str()), Some("Session extended."));
    }

    #[test]
    fn extend_without_a_session_stays_quiet() {
        let clock = Arc::new(ManualClock::default());
        let mut app = App::new(Prefs::default(), clock, Arc::new(MemoryStore::new()));
        app.extend_session();
        assert!(app.notifications.current.is_none());
    }
}

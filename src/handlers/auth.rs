use crate::app::App;
use crate::state::signup::SignupStep;
use crate::state::{AppMode, LoginField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle authentication input (login/signup)
pub fn handle_auth_input(key: KeyEvent, app: &mut App) {
    if app.ui.mode == AppMode::Login {
        handle_login_input(key, app);
    } else {
        handle_signup_input(key, app);
    }
}

fn handle_login_input(key: KeyEvent, app: &mut App) {
    if app.auth.is_loading {
        return;
    }
    match key.code {
        KeyCode::Char(c) => app.auth.input_char(c),
        KeyCode::Backspace => app.auth.backspace(),
        KeyCode::Tab | KeyCode::Down => app.auth.focus = app.auth.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.auth.focus = app.auth.focus.prev(),
        KeyCode::Enter => match app.auth.focus {
            LoginField::Email => app.auth.focus = LoginField::Password,
            LoginField::Password | LoginField::Submit => app.submit_login(),
            LoginField::Signup => app.open_signup(),
        },
        KeyCode::Esc => app.ui.open_quit_confirm(),
        _ => {}
    }
}

fn handle_signup_input(key: KeyEvent, app: &mut App) {
    if app.signup.is_checking_nickname() {
        return;
    }
    if app.signup.step == SignupStep::Company {
        match key.code {
            KeyCode::Up => app.signup.move_company_cursor(false),
            KeyCode::Down => app.signup.move_company_cursor(true),
            KeyCode::Enter => app.signup_next(),
            KeyCode::Esc => app.back_to_login(),
            _ => {}
        }
        return;
    }

    match key.code {
        // Ctrl+R resends the verification code
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.signup.step == SignupStep::Verify {
                app.signup.send_verification();
            }
        }
        KeyCode::Char(c) => app.signup.input_char(c),
        KeyCode::Backspace => app.signup.backspace(),
        KeyCode::Tab | KeyCode::Down => app.signup.focus_next(),
        KeyCode::Enter => app.signup_next(),
        KeyCode::Esc => {
            if !app.signup.prev() {
                app.back_to_login();
            }
        }
        _ => {}
    }
}

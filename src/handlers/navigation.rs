use crate::app::App;
use crate::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle global shortcuts that work across all modes
pub fn handle_global_shortcuts(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Show quit confirmation dialog
            app.ui.open_quit_confirm();
            true
        }
        KeyCode::F(1) => {
            app.ui.show_help = !app.ui.show_help;
            true
        }
        _ => false,
    }
}

/// Handle the achievements screen
pub fn handle_achievements_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => app.achievements.select_prev(),
        KeyCode::Down => app.achievements.select_next(),
        KeyCode::Enter => {
            let Some(badge) = app.achievements.achievements.get(app.achievements.selected).map(|a| a.reward_badge) else {
                return;
            };
            if app.achievements.set_current_badge(badge) {
                let name = app.achievements.badge(badge).map(|b| b.name).unwrap_or(badge);
                app.set_notification(format!("Badge equipped: {name}"), crate::state::ToastKind::Info);
            }
        }
        KeyCode::Esc | KeyCode::Char('a') => app.switch_mode(AppMode::Board),
        _ => {}
    }
}

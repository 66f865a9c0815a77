//! Main UI module. Re-exports submodules and provides the main entry point.

pub mod achievements;
pub mod auth;
pub mod banner;
pub mod board;
pub mod chat;
pub mod popups;
pub mod time_format;

use ratatui::Frame;
use crate::app::App;
use crate::state::{AppMode, BoardFocus};
use crate::ui::banner::{draw_full_banner, draw_min_banner};
use crate::ui::popups::{draw_help_popup, draw_modal, draw_quit_confirm_popup, draw_session_warning_popup, draw_toast};

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    let (banner_height, use_full_banner) = match app.ui.mode {
        AppMode::Login | AppMode::Signup => (8, true),
        _ => (2, false),
    };
    let chunks = ratatui::layout::Layout::default()
        .constraints([
            ratatui::layout::Constraint::Length(banner_height), // Banner height
            ratatui::layout::Constraint::Min(0),                // Main Content
            ratatui::layout::Constraint::Length(3),             // Footer
        ])
        .split(size);

    if use_full_banner {
        draw_full_banner(f, app, chunks[0]);
    } else {
        draw_min_banner(f, app, chunks[0]);
    }

    let help_text = match (app.ui.mode, app.ui.board_focus) {
        (AppMode::Login, _) => "[Esc] QUIT | [Tab]/[Shift+Tab] Change Focus\n[Enter] Select/Submit",
        (AppMode::Signup, _) => "[Tab] Next Field | [Enter] Next Step | [Esc] Back\n[Ctrl+R] Resend Code",
        (AppMode::Achievements, _) => "[↑↓] Nav | [Enter] Wear Badge | [Esc] Back",
        (AppMode::Board, BoardFocus::Search) => "Type to search | [Enter]/[Esc] Done",
        (AppMode::Board, BoardFocus::Chat) => "[Enter] Send | [Tab] Channel | [Esc] Back",
        (AppMode::Board, BoardFocus::Deals) => "[↑↓] Nav | [←→] Page | [s/t/p] Filters | [/] Search\n[n/b] Sell/Buy | [m] Message | [F1] Help | [q] Quit",
    };
    let status_text = if app.session.is_active() {
        let nickname = app.store.user_nickname();
        match app.session.stats() {
            Some(stats) => format!("{nickname} · session {}", stats.elapsed_text),
            None => format!("Logged in as: {nickname}"),
        }
    } else if app.attempts.is_locked() {
        format!("Locked: {}", app.attempts.remaining_time_text())
    } else {
        "Not Logged In".to_string()
    };

    // Split footer into two sections: help text and status
    let footer_chunks = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(67), // Help text area
            ratatui::layout::Constraint::Percentage(33), // Status area
        ])
        .split(chunks[2]);

    // Render help text with multiline support and wrapping
    f.render_widget(
        ratatui::widgets::Paragraph::new(help_text)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(ratatui::widgets::Block::default().borders(ratatui::widgets::Borders::TOP)),
        footer_chunks[0],
    );

    // Render status text right-aligned
    f.render_widget(
        ratatui::widgets::Paragraph::new(ratatui::text::Span::styled(
            status_text,
            ratatui::style::Style::default().fg(ratatui::style::Color::Yellow)
        ))
            .alignment(ratatui::layout::Alignment::Right)
            .block(ratatui::widgets::Block::default().borders(ratatui::widgets::Borders::TOP)),
        footer_chunks[1],
    );

    let main_area = chunks[1];
    match app.ui.mode {
        AppMode::Login => auth::draw_login(f, app, main_area),
        AppMode::Signup => auth::draw_signup(f, app, main_area),
        AppMode::Board => board::draw_board(f, app, main_area),
        AppMode::Achievements => achievements::draw_achievements(f, app, main_area),
    }

    draw_modal(f, app);

    if app.ui.show_help {
        draw_help_popup(f);
    }

    if app.session.show_warning() {
        draw_session_warning_popup(f, app);
    }

    if let Some(toast) = &app.notifications.current {
        draw_toast(f, toast);
    }

    if app.ui.show_quit_confirm {
        draw_quit_confirm_popup(f, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::logged_in;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn board_renders_deals_and_pagination() {
        let (app, _) = logged_in();
        let screen = render(&app);
        assert!(screen.contains("Deals"));
        assert!(screen.contains("Popular"));
        assert!(screen.contains("1-10 / 12"));
    }

    #[test]
    fn login_screen_renders() {
        use crate::clock::ManualClock;
        use crate::prefs::Prefs;
        use crate::storage::MemoryStore;
        use std::sync::Arc;

        let app = App::new(Prefs::default(), Arc::new(ManualClock::default()), Arc::new(MemoryStore::new()));
        let screen = render(&app);
        assert!(screen.contains("Login"));
        assert!(screen.contains("Not Logged In"));
    }
}

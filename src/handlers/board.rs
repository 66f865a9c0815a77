use crate::app::App;
use crate::state::{AppMode, BoardFocus};
use crossterm::event::{KeyCode, KeyEvent};

/// Handle input on the deal board
pub fn handle_board_input(key: KeyEvent, app: &mut App) {
    match app.ui.board_focus {
        BoardFocus::Deals => handle_deals_input(key, app),
        BoardFocus::Search => handle_search_input(key, app),
        BoardFocus::Chat => crate::handlers::chat::handle_chat_input(key, app),
    }
}

fn handle_deals_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => {
            let rows = app.store.page().items.len();
            app.ui.select_row(false, rows);
        }
        KeyCode::Down => {
            let rows = app.store.page().items.len();
            app.ui.select_row(true, rows);
        }
        KeyCode::Left => {
            if app.store.prev_page() {
                app.ui.selected_row = 0;
            }
        }
        KeyCode::Right => {
            if app.store.next_page() {
                app.ui.selected_row = 0;
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            let page = c as usize - '0' as usize;
            if app.store.set_current_page(page) {
                app.ui.selected_row = 0;
            }
        }
        KeyCode::Char('s') => {
            let next = app.store.filter().status_filter().next();
            app.store.set_status_filter(next);
            app.ui.selected_row = 0;
        }
        KeyCode::Char('t') => {
            let next = app.store.filter().type_filter().next();
            app.store.set_type_filter(next);
            app.ui.selected_row = 0;
        }
        KeyCode::Char('p') => {
            let next = app.store.filter().items_per_page().next();
            app.store.set_items_per_page(next);
            app.ui.selected_row = 0;
        }
        KeyCode::Char('r') => {
            app.store.reset_filters();
            app.ui.selected_row = 0;
        }
        KeyCode::Char('/') => app.ui.board_focus = BoardFocus::Search,
        KeyCode::Char('c') => {
            app.chat.set_minimized(false);
            app.ui.board_focus = BoardFocus::Chat;
        }
        KeyCode::Char('z') => app.chat.toggle_minimized(),
        KeyCode::Char('n') => app.open_sell(),
        KeyCode::Char('b') => app.open_buy(),
        KeyCode::Char('m') => app.open_message(),
        KeyCode::Enter => app.open_seller(),
        KeyCode::Char('a') => app.switch_mode(AppMode::Achievements),
        KeyCode::Char('e') if app.session.is_expired() => app.extend_session(),
        KeyCode::Char('o') => app.logout(),
        KeyCode::Char('?') => app.ui.show_help = !app.ui.show_help,
        KeyCode::Esc | KeyCode::Char('q') => app.ui.open_quit_confirm(),
        _ => {}
    }
}

fn handle_search_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) => {
            let term = format!("{}{c}", app.store.filter().search_term());
            app.store.set_search_term(term);
            app.ui.selected_row = 0;
        }
        KeyCode::Backspace => {
            let mut term = app.store.filter().search_term().to_string();
            term.pop();
            app.store.set_search_term(term);
            app.ui.selected_row = 0;
        }
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => app.ui.board_focus = BoardFocus::Deals,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{logged_in, press, type_str};
    use crate::model::{StatusFilter, TypeFilter};
    use crate::state::ModalKind;

    #[test]
    fn filter_keys_reset_the_page() {
        let (mut app, _) = logged_in();
        assert_eq!(app.store.total_pages(), 2);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.filter().current_page(), 2);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.store.filter().status_filter(), StatusFilter::Selling);
        assert_eq!(app.store.filter().current_page(), 1);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.store.filter().type_filter(), TypeFilter::Sell);
        assert_eq!(app.store.filtered().len(), 4);

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.store.filter().current_page(), 1);
    }

    #[test]
    fn search_narrows_the_board() {
        let (mut app, _) = logged_in();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "50만");
        assert_eq!(app.store.filtered().len(), 3);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.store.filter().search_term(), "50");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.board_focus, BoardFocus::Deals);
    }

    #[test]
    fn enter_opens_the_seller_card() {
        let (mut app, _) = logged_in();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.store.modals().is_open(ModalKind::Seller));
        assert_eq!(app.store.modals().selected_seller().unwrap().name, "익명거래자2");
    }
}

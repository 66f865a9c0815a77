use crate::app::App;
use crate::state::BoardFocus;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle chat sidebar input
pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) => app.chat.input.push(c),
        KeyCode::Backspace => {
            app.chat.input.pop();
        }
        KeyCode::Enter => app.send_chat(),
        KeyCode::Tab => app.chat.next_channel(),
        KeyCode::Esc => app.ui.board_focus = BoardFocus::Deals,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{logged_in, press, type_str};
    use crate::state::ChannelId;

    #[test]
    fn typed_message_lands_in_active_channel() {
        let (mut app, _) = logged_in();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.ui.board_focus, BoardFocus::Chat);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.chat.active_channel, ChannelId::Trade);

        type_str(&mut app, "팝니다");
        press(&mut app, KeyCode::Enter);
        let last = app.chat.channel_messages(ChannelId::Trade).last().unwrap();
        assert_eq!(last.text, "팝니다");
        assert_eq!(last.author, "test1");
        assert!(app.chat.input.is_empty());
        assert_eq!(app.chat.unread_count(ChannelId::Trade), 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.board_focus, BoardFocus::Deals);
    }
}

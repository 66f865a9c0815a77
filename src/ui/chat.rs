use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::state::chat::UserStatus;
use crate::state::{BoardFocus, ChannelId};

pub fn draw_chat_bar(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.ui.board_focus == BoardFocus::Chat;
    let border = if focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    let unread = app.chat.total_unread();
    let title = if unread > 0 { format!("Chat ({unread})") } else { "Chat".to_string() };
    let block = Block::default().borders(Borders::ALL).border_style(border).title(title);

    if app.chat.is_minimized() {
        let hint = Paragraph::new(Span::styled("[c] open  [z] expand", Style::default().fg(Color::DarkGray))).block(block);
        f.render_widget(hint, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);
    let chunks = Layout::default()
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let titles: Vec<Line> = app
        .chat
        .channels
        .iter()
        .map(|c| {
            if c.unread > 0 {
                Line::from(format!("#{} {}", c.id.name(), c.unread))
            } else {
                Line::from(format!("#{}", c.id.name()))
            }
        })
        .collect();
    let selected = ChannelId::ALL.iter().position(|c| *c == app.chat.active_channel).unwrap_or(0);
    f.render_widget(
        Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .divider(""),
        chunks[0],
    );

    let messages = app.chat.channel_messages(app.chat.active_channel);
    let visible = chunks[1].height as usize;
    let lines: Vec<Line> = messages
        .iter()
        .skip(messages.len().saturating_sub(visible))
        .map(|m| {
            Line::from(vec![
                Span::styled(format!("{} ", m.timestamp), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{}: ", m.author), Style::default().fg(Color::Cyan)),
                Span::raw(m.text.as_str()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[1]);

    let typing = app.chat.typing_users(app.chat.active_channel);
    let online = app.chat.online_users.iter().filter(|u| u.status == UserStatus::Online).count();
    let status = if typing.is_empty() {
        format!("{online} online")
    } else {
        let names: Vec<&str> = typing.iter().map(|u| u.name.as_str()).collect();
        format!("{} typing...", names.join(", "))
    };
    f.render_widget(Paragraph::new(Span::styled(status, Style::default().fg(Color::DarkGray))), chunks[2]);

    let input = Paragraph::new(Line::from(vec![Span::raw("> "), Span::raw(app.chat.input.as_str())]));
    f.render_widget(input, chunks[3]);
    if focused {
        let x = chunks[3].x + 2 + app.chat.input.chars().count() as u16;
        f.set_cursor_position((x.min(chunks[3].right().saturating_sub(1)), chunks[3].y));
    }
}

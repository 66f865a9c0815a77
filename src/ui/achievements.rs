use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::state::achievements::{Rarity, EXP_PER_LEVEL};

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Uncommon => Color::Green,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    }
}

pub fn draw_achievements(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.achievements;
    let rows = Layout::default()
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let progress = state.progress();
    let summary = Line::from(vec![
        Span::styled(format!("Lv.{} ", state.user_level), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "· {} EXP · {}/{} achievements · {} trades",
            state.user_exp, progress.completed, progress.total, state.trade_stats.total_trades
        )),
    ]);
    f.render_widget(Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title("Achievements")), rows[0]);

    let into_level = state.user_exp % EXP_PER_LEVEL;
    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Next level"))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(into_level as f64 / EXP_PER_LEVEL as f64)
            .label(format!("{into_level}/{EXP_PER_LEVEL}")),
        rows[1],
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);

    let items: Vec<ListItem> = state
        .achievements
        .iter()
        .map(|a| {
            let mark = if a.completed {
                Span::styled("✔ ", Style::default().fg(Color::Green))
            } else {
                Span::styled("· ", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                mark,
                Span::styled(format!("{:<8}", a.category.label()), Style::default().fg(Color::DarkGray)),
                Span::styled(a.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}  ", a.description)),
                Span::styled(format!("+{} EXP", a.reward_exp), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("{}% complete", progress.percentage)))
        .highlight_style(Style::default().bg(Color::DarkGray));
    f.render_stateful_widget(list, cols[0], &mut list_state);

    let badges: Vec<ListItem> = state
        .badges
        .iter()
        .map(|b| {
            let style = if b.unlocked {
                Style::default().fg(rarity_color(b.rarity))
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let worn = if state.current_badge == Some(b.id) { " (worn)" } else { "" };
            ListItem::new(Span::styled(format!("{}{worn}", b.name), style))
        })
        .collect();
    f.render_widget(List::new(badges).block(Block::default().borders(Borders::ALL).title("Badges")), cols[1]);
}

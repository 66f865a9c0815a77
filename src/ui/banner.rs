//! Banner drawing utilities for the UI.

use figlet_rs::FIGfont;
use once_cell::sync::Lazy;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

const TITLE: &str = "BLACK MARKET";

// Rendered once; the standard font ships inside figlet-rs.
static FIGLET_LINES: Lazy<Vec<String>> = Lazy::new(|| {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
});

/// Flicker keyed on tick and cell position.
fn glitch(tick_count: u64, x: usize, y: usize) -> bool {
    let seed = tick_count
        .wrapping_mul(6364136223846793005)
        .wrapping_add(((x as u64) << 8) | y as u64)
        .rotate_left(17);
    seed % 997 == 0
}

pub fn get_styled_banner_lines(width: u16, tick_count: u64) -> Vec<Line<'static>> {
    let figlet_width = FIGLET_LINES.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    if FIGLET_LINES.is_empty() || figlet_width > width as usize {
        return vec![Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ))];
    }

    FIGLET_LINES
        .iter()
        .enumerate()
        .map(|(y, line)| {
            let spans: Vec<Span<'static>> = line
                .chars()
                .enumerate()
                .map(|(x, c)| {
                    if c != ' ' && glitch(tick_count, x, y) {
                        Span::styled("▓", Style::default().bg(Color::Black).fg(Color::Rgb(255, 100, 255)))
                    } else {
                        Span::styled(c.to_string(), Style::default().fg(Color::Magenta))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn draw_full_banner(f: &mut Frame, app: &App, area: Rect) {
    let banner = Paragraph::new(get_styled_banner_lines(area.width, app.ui.tick_count))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(banner, area);
}

pub fn draw_min_banner(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {TITLE} "),
        Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
    )];
    let company = app.store.user_company();
    if !company.is_empty() {
        spans.push(Span::styled(format!("  {company}"), Style::default().fg(Color::Cyan)));
    }
    if let Some(badge) = app.achievements.current_badge.and_then(|id| app.achievements.badge(id)) {
        spans.push(Span::styled(format!("  [{}]", badge.name), Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(
        format!("  Lv.{}", app.achievements.user_level),
        Style::default().fg(Color::Green),
    ));
    let banner = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(banner, area);
}

//! Popups: toasts, modals, session warning, quit confirmation.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::model::DealType;
use crate::state::listing::{ListingField, ListingForm, ListingStep};
use crate::state::{ModalState, SellerProfile, Toast, ToastKind};
use crate::ui::time_format::{format_points, format_won};

pub fn draw_centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default().direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2), Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ]).split(r);
    Layout::default().direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2), Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ]).split(popup_layout[1])[1]
}

fn toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Info => Color::Cyan,
        ToastKind::Warning => Color::Yellow,
        ToastKind::Error => Color::Red,
    }
}

/// Small toast pinned to the top-right corner.
pub fn draw_toast(f: &mut Frame, toast: &Toast) {
    let size = f.area();
    let text_width = toast.message.chars().count() as u16 + 4;
    let width = 30u16.max(text_width).min(size.width.saturating_sub(4).max(1));
    let height = 3u16.min(size.height);
    let x = size.x + size.width.saturating_sub(width + 2);
    let y = size.y + 1u16.min(size.height.saturating_sub(height));
    let area = Rect { x, y, width, height };
    let color = toast_color(toast.kind);
    let block = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(color));
    let p = Paragraph::new(Span::styled(toast.message.as_str(), Style::default().fg(color))).block(block);
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

fn yes_no_line(selected: usize, yes: &'static str, no: &'static str) -> Line<'static> {
    let yes_style = if selected == 0 {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let no_style = if selected == 1 {
        Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };
    Line::from(vec![Span::styled(yes, yes_style), Span::raw("  "), Span::styled(no, no_style)])
}

pub fn draw_quit_confirm_popup(f: &mut Frame, app: &App) {
    // Try to ensure the popup is tall enough for all content (message + buttons + paddings)
    let mut percent_y = 18u16;
    let percent_x = 40u16;
    let content_lines = 5;
    let mut area = draw_centered_rect(f.area(), percent_x, percent_y);
    let mut popup_height = area.height.saturating_sub(2); // minus borders
    // If not enough height, increase percent_y up to 60%
    while popup_height < content_lines && percent_y < 60 {
        percent_y += 5;
        area = draw_centered_rect(f.area(), percent_x, percent_y);
        popup_height = area.height.saturating_sub(2);
    }
    let block = Block::default()
        .title("Are you sure?")
        .borders(Borders::ALL)
        .border_type(BorderType::Double);
    let pad_top = popup_height.saturating_sub(content_lines) / 2;
    let mut lines = vec![Line::from(""); pad_top as usize + 1];
    lines.push(Line::from(Span::styled(
        "Do you really want to quit?",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(yes_no_line(app.ui.quit_confirm_selected, "[ Yes ]", "[ No ]"));
    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(para, area);
}

pub fn draw_session_warning_popup(f: &mut Frame, app: &App) {
    let area = draw_centered_rect(f.area(), 44, 30);
    let block = Block::default()
        .title("Session expiring")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow));
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("You will be logged out in "),
            Span::styled(app.session.remaining_time_text(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("."),
        ]),
        Line::from(""),
        Line::from("[Enter] Stay logged in   [L] Log out"),
    ];
    let p = Paragraph::new(lines).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

pub fn draw_help_popup(f: &mut Frame) {
    let area = draw_centered_rect(f.area(), 60, 60);
    let rows = [
        ("↑/↓", "select deal"),
        ("←/→, 1-9", "change page"),
        ("s / t / p", "cycle status, type, page size"),
        ("/", "search titles and sellers"),
        ("r", "reset filters"),
        ("Enter", "seller info"),
        ("m", "message the seller"),
        ("n / b", "new sell / buy listing"),
        ("c / z", "focus chat / minimize chat"),
        ("a", "achievements"),
        ("o", "log out"),
        ("F1", "toggle this help"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(k, v)| {
            Line::from(vec![
                Span::styled(format!("{k:>10}  "), Style::default().fg(Color::Cyan)),
                Span::raw(*v),
            ])
        })
        .collect();
    let block = Block::default().title("Keys").borders(Borders::ALL).border_type(BorderType::Double);
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draws whichever modal the store has open.
pub fn draw_modal(f: &mut Frame, app: &App) {
    match app.store.modals().state() {
        ModalState::Closed => {}
        ModalState::SellForm => draw_listing_form(f, &app.sell_form),
        ModalState::BuyForm => draw_listing_form(f, &app.buy_form),
        ModalState::SellerInfo(profile) => draw_seller_popup(f, profile),
        ModalState::MessageCompose(deal) => {
            let area = draw_centered_rect(f.area(), 50, 30);
            let title = Line::from(vec![
                Span::raw("Message to "),
                Span::styled(deal.seller.as_str(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]);
            let body = if app.compose.is_sending {
                Paragraph::new(Span::styled("Sending...", Style::default().fg(Color::DarkGray)))
            } else {
                Paragraph::new(app.compose.text.as_str()).wrap(Wrap { trim: true })
            };
            let block = Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Double);
            let inner = block.inner(area);
            f.render_widget(Clear, area);
            f.render_widget(body.block(block), area);
            if !app.compose.is_sending && inner.width > 0 {
                let col = app.compose.text.chars().count() as u16 % inner.width;
                f.set_cursor_position((inner.x + col, inner.y));
            }
        }
    }
}

fn draw_seller_popup(f: &mut Frame, profile: &SellerProfile) {
    let area = draw_centered_rect(f.area(), 40, 35);
    let stars = "★".repeat(profile.rating.round() as usize);
    let lines = vec![
        Line::from(Span::styled(profile.name.as_str(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![Span::raw("Rating:  "), Span::styled(format!("{stars} {:.1}", profile.rating), Style::default().fg(Color::Yellow))]),
        Line::from(format!("Deals:   {}", profile.deal_count)),
        Line::from(format!("Company: {}", profile.company)),
        Line::from(""),
        Line::from(Span::styled("[m] Message  [Esc] Close", Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default().title("Seller").borders(Borders::ALL).border_type(BorderType::Double);
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Center), area);
}

fn field_line<'a>(form: &'a ListingForm, field: ListingField, label: &'a str, value: String) -> Vec<Line<'a>> {
    let focused = form.focus == field && form.step != ListingStep::Confirm;
    let style = if focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    let marker = if focused { "> " } else { "  " };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{marker}{label:<12}"), style),
        Span::styled(value, style.add_modifier(Modifier::BOLD)),
    ])];
    if let Some(err) = form.errors.get(&field) {
        lines.push(Line::from(Span::styled(format!("    {err}"), Style::default().fg(Color::Red))));
    }
    lines
}

fn draw_listing_form(f: &mut Frame, form: &ListingForm) {
    let area = draw_centered_rect(f.area(), 60, 60);
    let (title, option_label, option_value) = match form.kind {
        DealType::Sell => ("Sell points", "Expires in", format!("{} days", form.expiry_days)),
        DealType::Buy => ("Buy points", "Urgency", form.urgency.to_string()),
    };
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Step {}/3", form.step.number()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    match form.step {
        ListingStep::Info => {
            lines.extend(field_line(form, ListingField::Title, "Title", form.title.clone()));
            lines.extend(field_line(form, ListingField::Points, "Points", form.points.clone()));
            lines.extend(field_line(form, ListingField::Choice, option_label, format!("◀ {option_value} ▶")));
            lines.extend(field_line(form, ListingField::Description, "Description", form.description.clone()));
        }
        ListingStep::Price => {
            lines.extend(field_line(form, ListingField::Price, "Price (₩)", form.price.clone()));
            if let Some(ppp) = form.price_per_point() {
                lines.push(Line::from(Span::styled(
                    format!("    ₩{ppp:.2} per point"),
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        ListingStep::Confirm => {
            let points = form.points.parse::<u64>().map(format_points).unwrap_or_default();
            let price = form.price.parse::<u64>().map(format_won).unwrap_or_default();
            lines.push(Line::from(format!("Title:   {}", form.title)));
            lines.push(Line::from(format!("Points:  {points}")));
            lines.push(Line::from(format!("Price:   {price}")));
            lines.push(Line::from(format!("{option_label}: {option_value}")));
            if !form.description.is_empty() {
                lines.push(Line::from(format!("Note:    {}", form.description)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("[Enter] Post listing", Style::default().fg(Color::Green))));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Tab] Next field  [Enter] Next step  [Shift+Tab] Back  [Esc] Cancel",
        Style::default().fg(Color::DarkGray),
    )));
    let block = Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Double);
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

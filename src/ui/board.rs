//! The deal board: filters, deal table, pagination and market sidebar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Sparkline, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::mock_data::{POINT_PRICE_SERIES, RECENT_TRADES};
use crate::model::{DealStatus, DealType};
use crate::query;
use crate::state::BoardFocus;
use crate::ui::time_format::{format_last_login, format_points, format_won};

pub fn draw_board(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(60), Constraint::Length(36)])
        .split(area);

    let main = Layout::default()
        .constraints([
            Constraint::Length(1), // greeting
            Constraint::Length(3), // filter bar
            Constraint::Min(5),    // deal table
            Constraint::Length(1), // pagination
        ])
        .split(columns[0]);

    draw_greeting(f, app, main[0]);
    draw_filter_bar(f, app, main[1]);
    draw_deal_table(f, app, main[2]);
    draw_pagination(f, app, main[3]);

    let side = if app.chat.is_minimized() {
        Layout::default()
            .constraints([Constraint::Min(7), Constraint::Length(7), Constraint::Length(5), Constraint::Length(3)])
            .split(columns[1])
    } else {
        Layout::default()
            .constraints([Constraint::Length(7), Constraint::Length(7), Constraint::Length(5), Constraint::Min(8)])
            .split(columns[1])
    };
    draw_popular(f, app, side[0]);
    draw_recent_trades(f, side[1]);
    draw_price_chart(f, side[2]);
    crate::ui::chat::draw_chat_bar(f, app, side[3]);
}

fn draw_greeting(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!("{}님, 안녕하세요", app.store.user_nickname()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(at) = app.auth.last_login {
        spans.push(Span::styled(
            format!("  · last login {}", format_last_login(at, app.now_utc())),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let filter = app.store.filter();
    let searching = app.ui.board_focus == BoardFocus::Search;
    let search_style = if searching { Style::default().fg(Color::Yellow) } else { Style::default() };
    let search = if filter.search_term().is_empty() && !searching {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(filter.search_term(), search_style)
    };
    let line = Line::from(vec![
        Span::raw("Status: "),
        Span::styled(filter.status_filter().label(), Style::default().fg(Color::Cyan)),
        Span::raw("  Type: "),
        Span::styled(filter.type_filter().label(), Style::default().fg(Color::Cyan)),
        Span::raw(format!("  {}  ", filter.items_per_page())),
        Span::raw("Search: "),
        search,
    ]);
    let block = Block::default().borders(Borders::ALL).border_style(search_style).title("Filters");
    f.render_widget(Paragraph::new(line).block(block), area);
    if searching {
        let x = area.x + 1 + line_width_before_search(app) as u16 + filter.search_term().chars().count() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn line_width_before_search(app: &App) -> usize {
    let filter = app.store.filter();
    format!(
        "Status: {}  Type: {}  {}  Search: ",
        filter.status_filter().label(),
        filter.type_filter().label(),
        filter.items_per_page()
    )
    .chars()
    .count()
}

fn draw_deal_table(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Deals");
    if app.store.is_loading() {
        let p = Paragraph::new("Loading deals...").alignment(Alignment::Center).block(block);
        f.render_widget(p, area);
        return;
    }

    let page = app.store.page();
    if page.is_empty() {
        let p = Paragraph::new(Span::styled("No deals match the current filters.", Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(["Type", "Title", "Points", "Price", "₩/pt", "Seller", "Views", "Status"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = page
        .items
        .iter()
        .map(|deal| {
            let (kind, kind_color) = match deal.deal_type {
                DealType::Sell => ("SELL", Color::Red),
                DealType::Buy => ("BUY", Color::Green),
            };
            let status = match deal.status {
                DealStatus::Selling => Span::styled("open", Style::default().fg(Color::Green)),
                DealStatus::Completed => Span::styled("done", Style::default().fg(Color::DarkGray)),
            };
            Row::new(vec![
                Cell::from(Span::styled(kind, Style::default().fg(kind_color))),
                Cell::from(deal.title.clone()),
                Cell::from(format_points(deal.points)),
                Cell::from(format_won(deal.price)),
                Cell::from(format!("{:.2}", deal.price_per_point())),
                Cell::from(format!("{} ★{:.1}", deal.seller, deal.seller_rating)),
                Cell::from(deal.views.to_string()),
                Cell::from(status),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(16),
        Constraint::Length(5),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = TableState::default();
    if app.ui.board_focus == BoardFocus::Deals {
        state.select(Some(app.ui.selected_row.min(page.items.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_pagination(f: &mut Frame, app: &App, area: Rect) {
    let page = app.store.page();
    let mut spans = Vec::new();
    if let Some((start, end)) = query::page_range(page.current_page, page.per_page, page.total_items) {
        spans.push(Span::styled(
            format!("{start}-{end} / {}  ", page.total_items),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if page.has_pagination() {
        let arrow = |enabled: bool, s: &'static str| {
            Span::styled(s, if enabled { Style::default() } else { Style::default().fg(Color::DarkGray) })
        };
        spans.push(arrow(page.current_page > 1, "◀ "));
        for n in query::page_window(page.current_page, page.total_pages, app.config.page_buttons) {
            let style = if n == page.current_page {
                Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {n} "), style));
        }
        spans.push(arrow(page.current_page < page.total_pages, " ▶"));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_popular(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .popular(app.config.popular_deals)
        .into_iter()
        .enumerate()
        .map(|(i, deal)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(deal.title.clone()),
                Span::styled(format!(" ({})", deal.views), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(Block::default().borders(Borders::ALL).title("Popular")), area);
}

fn draw_recent_trades(f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = RECENT_TRADES
        .iter()
        .map(|t| {
            let (tag, color) = match t.deal_type {
                DealType::Buy => ("BUY ", Color::Green),
                DealType::Sell => ("SELL", Color::Red),
            };
            ListItem::new(Line::from(vec![
                Span::styled(tag, Style::default().fg(color)),
                Span::raw(format!(" {} {} ", t.points, t.price)),
                Span::styled(t.time, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(Block::default().borders(Borders::ALL).title("Recent trades")), area);
}

fn draw_price_chart(f: &mut Frame, area: Rect) {
    let data: Vec<u64> = POINT_PRICE_SERIES.iter().map(|(_, price)| *price).collect();
    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title("₩/pt · 24h"))
        .data(&data)
        .style(Style::default().fg(Color::Magenta));
    f.render_widget(sparkline, area);
}

//! Authentication (login/signup) UI screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::mock_data::COMPANIES;
use crate::state::signup::{NicknameStatus, PasswordStrength, SignupField, SignupStep};
use crate::state::LoginField;

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn draw_login(f: &mut Frame, app: &App, area: Rect) {
    let outer_block = Block::default().title("Login").borders(Borders::ALL);
    f.render_widget(outer_block, area);
    let chunks = Layout::default().margin(2).constraints([
        Constraint::Length(3), Constraint::Length(3), Constraint::Length(2), Constraint::Min(1)
    ]).split(area);

    let focus = app.auth.focus;
    f.render_widget(
        Paragraph::new(app.auth.email.as_str())
            .block(Block::default().borders(Borders::ALL).title("Company email")).style(focus_style(focus == LoginField::Email)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new("*".repeat(app.auth.password.chars().count()))
            .block(Block::default().borders(Borders::ALL).title("Password")).style(focus_style(focus == LoginField::Password)),
        chunks[1],
    );

    let status = if app.auth.is_loading {
        Line::from(Span::styled("Logging in...", Style::default().fg(Color::Cyan)))
    } else if let Some(err) = &app.auth.error {
        Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red)))
    } else {
        let attempts = app.attempts.status();
        if attempts.current > 0 {
            Line::from(Span::styled(
                format!("{} of {} attempts used", attempts.current, app.attempts.policy().max_attempts),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled("Demo account: test1@ekmtc.com / test1", Style::default().fg(Color::DarkGray)))
        }
    };
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center).wrap(Wrap { trim: true }), chunks[2]);

    let button_area = Layout::default().margin(1).constraints([Constraint::Length(3)]).split(chunks[3])[0];
    let button_chunks = Layout::default().direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)]).split(button_area);

    let submit_style = if focus == LoginField::Submit {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else { Style::default() };
    f.render_widget(Paragraph::new(Span::styled("[ LOGIN ]", submit_style)).alignment(Alignment::Center), button_chunks[0]);

    let switch_style = if focus == LoginField::Signup {
        Style::default().bg(Color::Magenta).fg(Color::Black)
    } else { Style::default() };
    f.render_widget(Paragraph::new(Span::styled("[ Sign up ]", switch_style)).alignment(Alignment::Center), button_chunks[1]);

    if focus == LoginField::Email {
        f.set_cursor_position((chunks[0].x + app.auth.email.chars().count() as u16 + 1, chunks[0].y + 1));
    } else if focus == LoginField::Password {
        f.set_cursor_position((chunks[1].x + app.auth.password.chars().count() as u16 + 1, chunks[1].y + 1));
    }
}

pub fn draw_signup(f: &mut Frame, app: &App, area: Rect) {
    let wizard = &app.signup;
    let title = format!("Sign up · step {}/{} · {}", wizard.step.number(), SignupStep::ALL.len(), wizard.step.title());
    f.render_widget(Block::default().title(title).borders(Borders::ALL), area);
    let chunks = Layout::default().margin(2).constraints([
        Constraint::Length(1), Constraint::Min(6), Constraint::Length(2)
    ]).split(area);

    let ratio = wizard.step.number() as f64 / SignupStep::ALL.len() as f64;
    f.render_widget(Gauge::default().gauge_style(Style::default().fg(Color::Magenta)).ratio(ratio).label(""), chunks[0]);

    match wizard.step {
        SignupStep::Company => {
            let items: Vec<ListItem> = COMPANIES
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let style = if i == wizard.company_cursor {
                        Style::default().fg(Color::Black).bg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(format!(" {} ", c.name), style.add_modifier(Modifier::BOLD)),
                        Span::raw(format!("  {}  @{}", c.description, c.domain)),
                    ]))
                })
                .collect();
            f.render_widget(List::new(items), chunks[1]);
        }
        SignupStep::Details | SignupStep::Credentials | SignupStep::Verify => {
            let fields: Vec<(SignupField, &str, &str, bool)> = match wizard.step {
                SignupStep::Details => vec![
                    (SignupField::Name, "Name", wizard.name.as_str(), false),
                    (SignupField::Email, "Company email", wizard.email.as_str(), false),
                ],
                SignupStep::Credentials => vec![
                    (SignupField::Nickname, "Nickname", wizard.nickname.as_str(), false),
                    (SignupField::Password, "Password", wizard.password.as_str(), true),
                    (SignupField::Confirm, "Confirm", wizard.confirm.as_str(), true),
                ],
                _ => vec![(SignupField::Code, "Verification code", wizard.code.as_str(), false)],
            };
            let mut lines = Vec::new();
            for (field, label, value, secret) in &fields {
                let shown = if *secret { "*".repeat(value.chars().count()) } else { value.to_string() };
                let style = focus_style(wizard.focus == Some(*field));
                lines.push(Line::from(vec![
                    Span::styled(format!("{label:<18}"), style),
                    Span::styled(shown, style.add_modifier(Modifier::BOLD)),
                ]));
            }
            if wizard.step == SignupStep::Credentials {
                if let Some(strength) = wizard.password_strength() {
                    let color = match strength {
                        PasswordStrength::Weak => Color::Red,
                        PasswordStrength::Medium => Color::Yellow,
                        PasswordStrength::Strong => Color::Green,
                    };
                    lines.push(Line::from(vec![
                        Span::raw(format!("{:<18}", "Strength")),
                        Span::styled(strength.label(), Style::default().fg(color)),
                    ]));
                }
                let nickname = match wizard.nickname_status {
                    NicknameStatus::Unchecked => None,
                    NicknameStatus::Checking => Some(("Checking nickname...", Color::Cyan)),
                    NicknameStatus::Available => Some(("Nickname available", Color::Green)),
                    NicknameStatus::Taken => Some(("Nickname taken", Color::Red)),
                };
                if let Some((text, color)) = nickname {
                    lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
                }
            }
            if let Some(info) = &wizard.info {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(info.as_str(), Style::default().fg(Color::Cyan))));
            }
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[1]);
        }
        SignupStep::Done => {
            let company = wizard.company.map(|c| c.name).unwrap_or_default();
            let lines = vec![
                Line::from(Span::styled("Welcome aboard!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
                Line::from(format!("{} ({company})", wizard.nickname)),
                Line::from(""),
                Line::from("Press Enter to go to the login screen."),
            ];
            f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);
        }
    }

    if let Some(err) = &wizard.error {
        f.render_widget(Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red))).wrap(Wrap { trim: true }), chunks[2]);
    }
}

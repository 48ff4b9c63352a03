use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::verdict::VerdictStatus;
use crate::mail::decoders::clip_value;
use crate::terminal::state::{AppState, Panel};

fn status_color(status: VerdictStatus) -> Color {
    match status {
        VerdictStatus::Pending => Color::Cyan,
        VerdictStatus::Success => Color::Green,
        VerdictStatus::Warning => Color::Yellow,
        VerdictStatus::Error => Color::Red,
    }
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<10}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn verdict_text(state: &AppState) -> Text<'static> {
    match &state.panel {
        Panel::Idle => Text::from(vec![
            Line::from("No headers read yet."),
            Line::from("Press h to read the message headers."),
        ]),
        Panel::Pending => Text::from(Line::from(Span::styled(
            "Reading headers…",
            Style::default().fg(status_color(VerdictStatus::Pending)),
        ))),
        Panel::Failed(msg) => Text::from(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        ))),
        Panel::Ready { info, verdict, .. } => {
            let badge = Span::styled(
                format!(" {} ", verdict.status.as_str().to_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(status_color(verdict.status))
                    .add_modifier(Modifier::BOLD),
            );
            let mut lines = vec![
                Line::from(vec![badge, Span::raw(" "), Span::raw(verdict.message.clone())]),
                Line::from(""),
                field("From", &info.from),
                field("To", &info.to),
                field("Subject", &info.subject),
                field("Date", &info.date),
            ];
            if let Some(sig) = &verdict.signature {
                lines.push(Line::from(""));
                lines.push(field("Signature", &clip_value(sig, 64)));
                lines.push(field("Timestamp", verdict.timestamp.as_deref().unwrap_or("-")));
                lines.push(field("Verdict", verdict.verdict.as_deref().unwrap_or("-")));
            }
            Text::from(lines)
        }
    }
}

pub fn render(f: &mut Frame, state: &AppState) {
    let [top, bottom, footer] = Layout::vertical([
        Constraint::Length(13),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(f.area());

    let border = state
        .status()
        .map(status_color)
        .unwrap_or(Color::DarkGray);

    // TOP: verdict + message summary
    let verdict_block = Block::default()
        .title(format!(" STEGA signature: {} ", state.source_label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let p = Paragraph::new(verdict_text(state))
        .block(verdict_block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, top);

    // BOTTOM: parsed headers
    let headers_block = Block::default()
        .title(" Headers ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let width = bottom.width.saturating_sub(4) as usize;
    let header_lines: Vec<Line> = match state.headers() {
        Some(h) => h
            .iter()
            .map(|(name, value)| {
                Line::from(vec![
                    Span::styled(format!("{name}: "), Style::default().fg(Color::Gray)),
                    Span::raw(clip_value(value, width.saturating_sub(name.len() + 2).max(8))),
                ])
            })
            .collect(),
        None => vec![Line::from("")],
    };

    let p = Paragraph::new(header_lines)
        .block(headers_block)
        .scroll((state.headers_scroll, 0));
    f.render_widget(p, bottom);

    let hint = match &state.notice {
        Some(n) => Line::from(Span::raw(n.clone())),
        None => Line::from(vec![
            Span::styled("h", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" read headers  "),
            Span::styled("c", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" export  "),
            Span::styled("j/k", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" scroll  "),
            Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ]),
    };
    f.render_widget(Paragraph::new(hint), footer);
}

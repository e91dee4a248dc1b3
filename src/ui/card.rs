use std::time::Duration;

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::models::Question;
use crate::session::RevealState;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    position: usize,
    total: usize,
    reveal: RevealState,
    time_until_reveal: Option<Duration>,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], position, total);
    render_prompt(frame, chunks[1], &question.prompt);

    match reveal {
        RevealState::Shown => render_answer(frame, chunks[2], &question.answer),
        RevealState::Hidden => render_countdown(frame, chunks[2], time_until_reveal),
    }

    render_controls(frame, chunks[3], reveal);
}

fn render_progress(frame: &mut Frame, area: Rect, position: usize, total: usize) {
    let widget = Paragraph::new(format!("{}/{}", position, total))
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_answer(frame: &mut Frame, area: Rect, answer: &str) {
    let lines = vec![
        Line::from(Span::styled("Answer", Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            answer,
            Style::default().fg(Color::Yellow).bold(),
        )),
    ];
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_countdown(frame: &mut Frame, area: Rect, time_until_reveal: Option<Duration>) {
    let text = match time_until_reveal {
        // round up so the countdown never shows 0 while still hidden
        Some(left) => format!("answer in {}s", left.as_millis().div_ceil(1000).max(1)),
        None => "space to reveal".to_string(),
    };
    let widget = Paragraph::new(text).fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, reveal: RevealState) {
    let text = match reveal {
        RevealState::Hidden => "space reveal  ·  q quit",
        RevealState::Shown => "space next  ·  q quit",
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

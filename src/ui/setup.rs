use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App, remaining: usize) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Fill(1),
    ])
    .split(area);

    let delay_label = if app.delay_secs() == 0 {
        "on keypress".to_string()
    } else {
        format!("{} s", app.delay_secs())
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "FLASHDRILL",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(format!("{} questions remaining", remaining).fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::raw("questions this run  "),
            Span::styled(
                format!("{}", app.requested_count()),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled("  j/k", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::raw("answer reveal       "),
            Span::styled(delay_label, Style::default().fg(Color::White).bold()),
            Span::styled("  h/l", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start · q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

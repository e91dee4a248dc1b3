use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ALL QUESTIONS COMPLETED",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(""),
        Line::from("this set is used up — load new material to continue".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("r", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" reload "),
            Span::styled(
                app.source().display().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from("q quit".fg(Color::DarkGray)),
    ];

    if let Some(error) = app.load_error() {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            error,
            Style::default().fg(Color::Red),
        )));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

pub fn render_no_set(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("no questions loaded · q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, remaining: usize) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .split(area);

    let remaining_line = if remaining == 0 {
        Line::from("no questions left in this set".fg(Color::DarkGray))
    } else {
        Line::from(format!("{} questions remaining in this set", remaining).fg(Color::DarkGray))
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RUN COMPLETE",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(""),
        remaining_line,
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to continue · q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

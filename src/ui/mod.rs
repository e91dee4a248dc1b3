mod card;
mod exhausted;
mod setup;
mod summary;

use std::time::Instant;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::ViewState;

pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.view(now) {
        ViewState::NoQuestionSet => exhausted::render_no_set(frame, area),
        ViewState::AwaitingStart { remaining } => setup::render(frame, area, app, remaining),
        ViewState::Presenting {
            question,
            position,
            total,
            reveal,
            time_until_reveal,
        } => card::render(
            frame,
            area,
            question,
            position,
            total,
            reveal,
            time_until_reveal,
        ),
        ViewState::RunComplete { remaining } => summary::render(frame, area, remaining),
        ViewState::SetExhausted => exhausted::render(frame, area, app),
    }
}

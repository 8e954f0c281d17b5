use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};

use super::centered_rect;
use crate::app::{App, Loading};

pub fn render(frame: &mut Frame, app: &App, progress: &Loading, area: Rect) {
    let glyph_style = Style::default().fg(Color::DarkGray);
    for (x, y, glyph) in app.floating.positions(area.width, area.height) {
        frame
            .buffer_mut()
            .set_string(area.x + x, area.y + y, glyph, glyph_style);
    }

    let popup = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🔍 Hunting for holidays ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let label = Paragraph::new(progress.label.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(label, chunks[0]);

    let gauge = Gauge::default()
        .percent(u16::from(progress.percent.min(100)))
        .label(format!("{}%", progress.percent))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black));
    frame.render_widget(gauge, chunks[2]);
}

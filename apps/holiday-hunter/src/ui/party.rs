use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(6)])
        .split(area);

    render_chart(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.dashboard.month_stats;
    let peak = app.dashboard.party_month().map(|m| m.index);

    let bars: Vec<Bar> = stats
        .iter()
        .map(|m| {
            let color = if Some(m.index) == peak {
                Color::Magenta
            } else {
                Color::Cyan
            };
            Bar::default()
                .value(m.count as u64)
                .label(Line::from(m.short_name()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let title = match app.dashboard.party_month() {
        Some(m) => format!(" Party Month: {} {} ({} holidays) ", m.glyph(), m.month, m.count),
        None => " Party Month ".to_string(),
    };

    let bar_width = (area.width.saturating_sub(2) / 12).saturating_sub(1).clamp(1, 8);
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let peak = app.dashboard.party_month().map(|m| m.index);

    let lines: Vec<Line> = app
        .dashboard
        .month_stats
        .chunks(6)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|m| {
                    let style = if Some(m.index) == peak {
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD)
                    } else if m.count == 0 {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    Span::styled(format!(" {} {} {:>3}  ", m.glyph(), m.short_name(), m.count), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let mut text = vec![Line::from("")];
    text.extend(lines);

    let grid = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Months "))
        .alignment(Alignment::Center);
    frame.render_widget(grid, area);
}

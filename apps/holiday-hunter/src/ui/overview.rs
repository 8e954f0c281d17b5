use holiday_core::Countdown;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::ticker;
use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    render_hero(frame, app, chunks[0]);
    render_tiles(frame, app, chunks[1]);
    render_countdown(frame, app, chunks[2]);
    render_ticker(frame, app, chunks[3]);
}

fn render_hero(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.dashboard;
    let lines = vec![
        Line::from(Span::styled(
            format!("Who gets the most days off in {}?", dashboard.year),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} holidays tracked · {} countries analyzed",
            dashboard.total_holidays,
            dashboard.countries_analyzed()
        )),
        Line::from(Span::styled(
            format!("Ranking by {}", dashboard.rule.label()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let hero = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(hero, area);
}

fn render_tiles(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let dashboard = &app.dashboard;

    let champion = match dashboard.champion() {
        Some(c) => tile_lines(
            format!("{} {}", c.emoji, c.name),
            format!("{} {}", c.holiday_count, dashboard.rule.label()),
        ),
        None => empty_tile("No champion yet"),
    };
    render_tile(frame, " 🏆 Champion ", champion, Color::Yellow, chunks[0]);

    let party = match dashboard.party_month() {
        Some(m) => tile_lines(
            format!("{} {}", m.glyph(), m.month),
            format!("{} holidays", m.count),
        ),
        None => empty_tile("No parties found"),
    };
    render_tile(frame, " 🎊 Party Month ", party, Color::Magenta, chunks[1]);

    let next = match app.next_holiday() {
        Some(h) => tile_lines(format!("{} {}", h.emoji, h.name), h.days_label()),
        None => empty_tile("Nothing ahead"),
    };
    render_tile(frame, " 📅 Next Up ", next, Color::Green, chunks[2]);

    let failed = dashboard.countries_failed();
    let coverage = tile_lines(
        format!("{} countries", dashboard.countries_analyzed()),
        if failed > 0 {
            format!("{} unreachable", failed)
        } else {
            "all reporting".to_string()
        },
    );
    render_tile(frame, " 🌍 Coverage ", coverage, Color::Cyan, chunks[3]);
}

fn tile_lines(headline: String, detail: String) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            headline,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
    ]
}

fn empty_tile(message: &'static str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        message,
        Style::default().fg(Color::DarkGray),
    ))]
}

fn render_tile(frame: &mut Frame, title: &str, lines: Vec<Line>, accent: Color, area: Rect) {
    let tile = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .title(title),
        )
        .alignment(Alignment::Center);
    frame.render_widget(tile, area);
}

fn render_countdown(frame: &mut Frame, app: &App, area: Rect) {
    let Some(next) = app.next_holiday() else {
        let empty = Paragraph::new("No upcoming holidays to count down to")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Countdown "))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let title = format!(" Countdown to {} {} ", next.emoji, next.name);
    let countdown = Countdown::until(next.date, app.now);

    let lines = if countdown.is_today {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "🎉 HAPPENING NOW! 🎉",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )),
            Line::from(format!("{} is celebrating today", next.country)),
        ]
    } else {
        let mut values = Vec::new();
        let mut labels = Vec::new();
        for (value, label) in countdown.segments() {
            values.push(Span::styled(
                format!("{:^8}", format!("{:02}", value)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            labels.push(Span::styled(
                format!("{:^8}", label),
                Style::default().fg(Color::DarkGray),
            ));
        }
        vec![
            Line::from(""),
            Line::from(values),
            Line::from(labels),
            Line::from(format!("{} · {}", next.country, next.date.format("%A, %B %-d"))),
        ]
    };

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_ticker(frame: &mut Frame, app: &App, area: Rect) {
    let text = ticker::ticker_text(&app.dashboard.upcoming);
    let width = area.width.saturating_sub(2) as usize;
    let visible = ticker::window(&text, app.ticker_offset, width);

    let widget = Paragraph::new(visible)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Coming Up "));
    frame.render_widget(widget, area);
}

use holiday_core::CountryHolidays;
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
};

use super::bar;
use crate::app::App;

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(podium) = app.podium() else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("Not enough countries for a podium yet."),
            Line::from(Span::styled(
                "At least three countries need holiday data. Press R to hunt again.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Laziness Leaderboard "),
        )
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(5)])
        .split(area);

    render_podium(frame, podium, app.dashboard.rule.label(), chunks[0]);
    render_mentions(frame, app, chunks[1]);
}

fn render_podium(frame: &mut Frame, podium: &[CountryHolidays], unit: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Laziness Leaderboard ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    // Display order: silver, gold, bronze.
    let places = [(1, 4, Color::Gray), (0, 6, Color::Yellow), (2, 2, Color::Red)];
    for (column, (rank, height, color)) in places.into_iter().enumerate() {
        render_step(frame, &podium[rank], rank, unit, height, color, columns[column]);
    }
}

fn render_step(
    frame: &mut Frame,
    country: &CountryHolidays,
    rank: usize,
    unit: &str,
    height: u16,
    color: Color,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(height),
        ])
        .split(area);

    let medal = ["🥇", "🥈", "🥉"][rank];
    let label = Paragraph::new(vec![
        Line::from(format!("{} {}", medal, country.emoji)),
        Line::from(Span::styled(
            country.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} {}", country.holiday_count, unit),
            Style::default().fg(color),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(label, rows[1]);

    let step = Paragraph::new(format!("{}", rank + 1))
        .style(Style::default().fg(Color::Black).bg(color))
        .alignment(Alignment::Center);
    frame.render_widget(step, rows[2].inner(Margin::new(2, 0)));
}

fn render_mentions(frame: &mut Frame, app: &App, area: Rect) {
    let mentions = app.honorable_mentions();
    let max = app
        .dashboard
        .champion()
        .map(|c| c.holiday_count)
        .unwrap_or(0);

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = 0;
    for (i, country) in mentions.iter().enumerate() {
        if i == app.selected {
            selected_row = items.len();
        }
        let expanded = app.expanded.as_deref() == Some(country.code.as_str());
        let marker = if expanded { "▾" } else { "▸" };

        items.push(ListItem::new(Line::from(vec![
            Span::raw(format!("{} #{:<3}", marker, i + 4)),
            Span::raw(format!("{} {:<20} ", country.emoji, country.name)),
            Span::styled(
                bar(country.holiday_count, max, BAR_WIDTH),
                Style::default().fg(Color::Green),
            ),
            Span::raw(format!(" {}", country.holiday_count)),
        ])));

        if expanded {
            if country.holidays.is_empty() {
                items.push(ListItem::new(Span::styled(
                    "      (no holidays)",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for holiday in &country.holidays {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("      {}  ", holiday.date.format("%b %d")),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(holiday.display_name().to_string()),
                ])));
            }
        }
    }

    let hidden = app.rest().len() - mentions.len();
    let title = if hidden > 0 {
        format!(" Honorable Mentions (+{} more, a: show all) ", hidden)
    } else {
        " Honorable Mentions ".to_string()
    };

    if items.is_empty() {
        let empty = Paragraph::new("Only the podium this time.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let total = items.len();
    let viewport_height = area.height.saturating_sub(2) as usize;

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default().with_selected(Some(selected_row));
    frame.render_stateful_widget(list, area, &mut state);

    // Scrollbar
    if total > viewport_height {
        let scrollbar = Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight);
        let mut scrollbar_state = ScrollbarState::new(total).position(selected_row);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

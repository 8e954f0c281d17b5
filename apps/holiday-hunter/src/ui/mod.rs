mod globe;
mod leaderboard;
mod loading;
mod overview;
mod party;
pub mod ticker;

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Tabs},
};

use crate::app::{App, View};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);
    render_main(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!("{} {}", i + 1, v.title())))
        .collect();
    let selected = View::ALL.iter().position(|v| *v == app.view).unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(area);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let brand = Paragraph::new(format!("🌴 Holiday Hunter {} ", app.dashboard.year))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Right);
    frame.render_widget(brand, chunks[1]);
}

fn render_main(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(progress) = &app.loading {
        loading::render(frame, app, progress, area);
        return;
    }

    match app.view {
        View::Overview => overview::render(frame, app, area),
        View::Leaderboard => leaderboard::render(frame, app, area),
        View::PartyMonth => party::render(frame, app, area),
        View::Globe => globe::render(frame, app, area),
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.status_message.is_some() {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };

    let status = Paragraph::new(app.status_text()).style(style);
    frame.render_widget(status, area);
}

/// Bar of `width` cells, `value / max` of it filled.
pub(crate) fn bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value * width + max - 1) / max
    };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{app, dashboard_with};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(5, 10, 4), "██░░");
        assert_eq!(bar(10, 10, 4), "████");
        assert_eq!(bar(1, 10, 4), "█░░░");
        assert_eq!(bar(3, 0, 3), "░░░");
    }

    #[test]
    fn test_render_every_view_when_empty() {
        let mut app = app();
        for view in View::ALL {
            app.view = view;
            let text = draw(&app);
            assert!(text.contains(view.title()));
        }
    }

    #[test]
    fn test_render_every_view_with_data() {
        let mut app = app();
        app.apply(crate::hunt::HuntEvent::Finished(dashboard_with(&[5, 4, 3, 2, 1])));
        for view in View::ALL {
            app.view = view;
            let text = draw(&app);
            assert!(text.contains("Tab:view"));
        }
    }

    #[test]
    fn test_loading_replaces_view() {
        let mut app = app();
        app.loading = Some(crate::app::Loading {
            percent: 40,
            label: "Scanning Peru...".to_string(),
        });
        let text = draw(&app);
        assert!(text.contains("Scanning Peru..."));
        assert!(text.contains("40%"));
    }
}

use holiday_core::{GeoPoint, Orthographic};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, List, ListItem,
    },
};

use crate::app::App;

const GRATICULE_STEP: f64 = 30.0;

/// Colour for a country holding `count` of the champion's `max` holidays.
fn heat(count: usize, max: usize) -> Color {
    if max == 0 {
        return Color::DarkGray;
    }
    let ratio = count as f64 / max as f64;
    if ratio >= 0.85 {
        Color::Red
    } else if ratio >= 0.65 {
        Color::LightRed
    } else if ratio >= 0.45 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn line_segments(
    projection: &Orthographic,
    line: &[GeoPoint],
    color: Color,
) -> impl Iterator<Item = CanvasLine> {
    projection
        .segments(line)
        .into_iter()
        .map(move |((x1, y1), (x2, y2))| CanvasLine::new(x1, y1, x2, y2, color))
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(area);

    render_canvas(frame, app, chunks[0]);
    render_legend(frame, app, chunks[1]);
}

fn render_canvas(frame: &mut Frame, app: &App, area: Rect) {
    let inner_w = area.width.saturating_sub(2).max(1) as f64;
    let inner_h = area.height.saturating_sub(2).max(1) as f64;
    // Terminal cells are about twice as tall as wide.
    let y_half = 1.1;
    let x_half = y_half * inner_w / (2.0 * inner_h);

    let projection = app.globe;
    let graticule = Orthographic::graticule(GRATICULE_STEP);
    let max = app
        .dashboard
        .champion()
        .map(|c| c.holiday_count)
        .unwrap_or(0);

    let markers: Vec<(f64, f64, Color, &str)> = app
        .dashboard
        .leaderboard
        .iter()
        .filter_map(|country| {
            let shape = app.atlas.resolve(&country.code, &country.name).ok()?;
            let (x, y) = projection.project(&shape.centroid)?;
            Some((x, y, heat(country.holiday_count, max), country.code.as_str()))
        })
        .collect();

    let title = format!(
        " Globe {:.0}°{} ",
        projection.center_lon.abs(),
        if projection.center_lon < 0.0 { "W" } else { "E" }
    );

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-y_half, y_half])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::Blue,
            });

            for line in &graticule {
                for segment in line_segments(&projection, line, Color::DarkGray) {
                    ctx.draw(&segment);
                }
            }

            if app.atlas.has_outlines() {
                for shape in app.atlas.shapes() {
                    for ring in &shape.rings {
                        for segment in line_segments(&projection, ring, Color::Gray) {
                            ctx.draw(&segment);
                        }
                    }
                }
            }

            ctx.layer();
            for (x, y, color, code) in &markers {
                ctx.print(
                    *x,
                    *y,
                    Span::styled(
                        format!("●{}", code),
                        Style::default().fg(*color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn render_legend(frame: &mut Frame, app: &App, area: Rect) {
    let max = app
        .dashboard
        .champion()
        .map(|c| c.holiday_count)
        .unwrap_or(0);

    let items: Vec<ListItem> = if app.dashboard.is_empty() {
        vec![ListItem::new(Span::styled(
            "No countries to plot",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.dashboard
            .leaderboard
            .iter()
            .map(|c| {
                let mapped = app.atlas.resolve(&c.code, &c.name).is_ok();
                let name_style = if mapped {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled("● ", Style::default().fg(heat(c.holiday_count, max))),
                    Span::raw(format!("{} ", c.emoji)),
                    Span::styled(format!("{:<18}", c.name), name_style),
                    Span::raw(format!("{:>3}", c.holiday_count)),
                ]))
            })
            .collect()
    };

    let title = if app.globe_paused {
        " Heat (paused) "
    } else {
        " Heat "
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

mod app;
mod config;
mod floating;
mod hunt;
mod logging;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use holiday_core::{Atlas, HolidayApi, NagerClient};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use app::App;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().unwrap_or_default();
    logging::init(&config).context("Failed to set up logging")?;

    let api: Arc<dyn HolidayApi> = Arc::new(
        NagerClient::new(&config.api.base_url, config.api.timeout())
            .context("Failed to build HTTP client")?,
    );
    let atlas = load_atlas(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config, api, atlas);
    app.refresh();

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn load_atlas(config: &Config) -> Atlas {
    let Some(path) = &config.map.geojson_path else {
        return Atlas::builtin();
    };
    match Atlas::load(path) {
        Ok(atlas) if !atlas.is_empty() => atlas,
        Ok(_) => {
            warn!(path = %path.display(), "geometry file has no usable shapes, using built-in markers");
            Atlas::builtin()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load geometry, using built-in markers");
            Atlas::builtin()
        }
    }
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(app.config.display.tick_ms.max(16));

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    break;
                }
            }
        }

        app.on_tick();
    }

    Ok(())
}

use chrono::{Datelike, Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use holiday_core::{Atlas, CountryHolidays, Dashboard, HolidayApi, Orthographic, UpcomingHoliday};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::floating::FloatingField;
use crate::hunt::{Hunt, HuntEvent, HuntSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Leaderboard,
    PartyMonth,
    Globe,
}

impl View {
    pub const ALL: [View; 4] = [View::Overview, View::Leaderboard, View::PartyMonth, View::Globe];

    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Leaderboard => "Laziness Leaderboard",
            View::PartyMonth => "Party Month",
            View::Globe => "Globe",
        }
    }

    fn next(self) -> Self {
        match self {
            View::Overview => View::Leaderboard,
            View::Leaderboard => View::PartyMonth,
            View::PartyMonth => View::Globe,
            View::Globe => View::Overview,
        }
    }

    fn prev(self) -> Self {
        match self {
            View::Overview => View::Globe,
            View::Leaderboard => View::Overview,
            View::PartyMonth => View::Leaderboard,
            View::Globe => View::PartyMonth,
        }
    }
}

/// Progress of the hunt currently in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loading {
    pub percent: u8,
    pub label: String,
}

impl Default for Loading {
    fn default() -> Self {
        Self {
            percent: 0,
            label: "Initializing...".to_string(),
        }
    }
}

pub struct App {
    pub config: Config,
    pub view: View,

    api: Arc<dyn HolidayApi>,
    hunt: Option<Hunt>,

    // Data
    pub dashboard: Dashboard,
    pub loading: Option<Loading>,
    pub atlas: Atlas,

    // Leaderboard state
    pub selected: usize,
    pub expanded: Option<String>,
    pub show_all: bool,

    // Animation state
    pub now: NaiveDateTime,
    pub ticker_offset: usize,
    pub globe: Orthographic,
    pub globe_paused: bool,
    pub floating: FloatingField,

    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn HolidayApi>, atlas: Atlas) -> Self {
        let now = Local::now().naive_local();
        Self {
            dashboard: Dashboard::empty(config.fetch.year.unwrap_or_else(|| now.year())),
            config,
            view: View::Overview,
            api,
            hunt: None,
            loading: None,
            atlas,
            selected: 0,
            expanded: None,
            show_all: false,
            now,
            ticker_offset: 0,
            globe: Orthographic::default(),
            globe_paused: false,
            floating: FloatingField::new(15),
            status_message: None,
        }
    }

    /// Start a fresh hunt, abandoning any hunt still running.
    pub fn refresh(&mut self) {
        info!("refresh requested");
        self.hunt = Some(Hunt::spawn(
            Arc::clone(&self.api),
            HuntSettings::from_config(&self.config),
        ));
        self.loading = Some(Loading::default());
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn on_tick(&mut self) {
        self.tick_at(Local::now().naive_local());
    }

    pub fn tick_at(&mut self, now: NaiveDateTime) {
        self.now = now;

        let events = self.hunt.as_mut().map(Hunt::poll).unwrap_or_default();
        for event in events {
            self.apply(event);
        }

        if self.is_loading() {
            self.floating.step();
        } else {
            self.ticker_offset = self.ticker_offset.wrapping_add(self.config.display.ticker_speed);
            if !self.globe_paused {
                self.globe.rotate(self.config.display.globe_speed_deg);
            }
        }
    }

    pub fn apply(&mut self, event: HuntEvent) {
        match event {
            HuntEvent::Progress(progress) => {
                self.loading = Some(Loading {
                    percent: progress.percent(),
                    label: progress.label,
                });
            }
            HuntEvent::Finished(dashboard) => {
                let failed = dashboard.countries_failed();
                for country in &dashboard.leaderboard {
                    if let Err(e) = self.atlas.resolve(&country.code, &country.name) {
                        debug!(error = %e, "country left off the globe");
                    }
                }
                self.dashboard = dashboard;
                self.loading = None;
                self.hunt = None;
                self.selected = 0;
                self.expanded = None;
                self.ticker_offset = 0;
                self.status_message = if failed > 0 {
                    Some(format!("{} countries could not be fetched", failed))
                } else {
                    None
                };
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let is_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        self.status_message = None;

        match key.code {
            KeyCode::Char('c') if is_ctrl => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,

            KeyCode::Tab => self.view = self.view.next(),
            KeyCode::BackTab => self.view = self.view.prev(),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.view = View::ALL[idx];
            }

            KeyCode::Char('R') => self.refresh(),

            _ if self.view == View::Leaderboard => self.handle_leaderboard_key(key),
            _ if self.view == View::Globe => self.handle_globe_key(key),
            _ => {}
        }

        false
    }

    fn handle_leaderboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.honorable_mentions().len().saturating_sub(1);
                if self.selected < max {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = self.honorable_mentions().len().saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let code = self.honorable_mentions().get(self.selected).map(|c| c.code.clone());
                if let Some(code) = code {
                    self.expanded = if self.expanded.as_deref() == Some(code.as_str()) {
                        None
                    } else {
                        Some(code)
                    };
                }
            }
            KeyCode::Char('a') => {
                self.show_all = !self.show_all;
                let max = self.honorable_mentions().len().saturating_sub(1);
                self.selected = self.selected.min(max);
            }
            _ => {}
        }
    }

    fn handle_globe_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.globe.rotate(-15.0),
            KeyCode::Char('l') | KeyCode::Right => self.globe.rotate(15.0),
            KeyCode::Char(' ') => self.globe_paused = !self.globe_paused,
            _ => {}
        }
    }

    /// First upcoming holiday that has not already passed on the local clock.
    pub fn next_holiday(&self) -> Option<&UpcomingHoliday> {
        let today = self.now.date();
        self.dashboard.upcoming.iter().find(|h| h.date >= today)
    }

    /// Podium finishers: the top three, when there are at least three.
    pub fn podium(&self) -> Option<&[CountryHolidays]> {
        self.dashboard.leaderboard.get(..3)
    }

    /// Everyone after the podium.
    pub fn rest(&self) -> &[CountryHolidays] {
        self.dashboard.leaderboard.get(3..).unwrap_or(&[])
    }

    /// The part of [`App::rest`] currently listed.
    pub fn honorable_mentions(&self) -> &[CountryHolidays] {
        let rest = self.rest();
        if self.show_all {
            rest
        } else {
            &rest[..rest.len().min(self.config.display.honorable_mentions)]
        }
    }

    pub fn status_text(&self) -> String {
        if let Some(msg) = &self.status_message {
            return msg.clone();
        }

        if let Some(loading) = &self.loading {
            return format!("{} {}% | q:quit", loading.label, loading.percent);
        }

        let base = "Tab:view 1-4:jump R:refresh q:quit";
        match self.view {
            View::Leaderboard => format!("j/k:nav Enter:expand a:show all | {}", base),
            View::Globe => format!("h/l:spin Space:pause | {}", base),
            _ => base.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use holiday_core::{
        AggregateOptions, AvailableCountry, Country, CountRule, FetchOutcome, FetchProgress,
        RawHoliday, Result,
    };

    pub(crate) struct NoopApi;

    #[async_trait]
    impl HolidayApi for NoopApi {
        async fn available_countries(&self) -> Result<Vec<AvailableCountry>> {
            Ok(Vec::new())
        }

        async fn public_holidays(&self, _year: i32, _code: &str) -> Result<Vec<RawHoliday>> {
            Ok(Vec::new())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub(crate) fn dashboard_with(counts: &[usize]) -> Dashboard {
        let outcomes = counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                let holidays = (0..*count)
                    .map(|d| {
                        RawHoliday::new(
                            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap() + chrono::Days::new(d as u64),
                            "Holiday",
                        )
                    })
                    .collect();
                FetchOutcome::Fetched {
                    country: Country::from_code(&format!("C{}", i), &format!("Country {}", i)),
                    holidays,
                }
            })
            .collect();
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Dashboard::build(
            outcomes,
            2025,
            now,
            AggregateOptions {
                rule: CountRule::Raw,
                upcoming_limit: 5,
            },
        )
    }

    pub(crate) fn app() -> App {
        App::new(Config::default(), Arc::new(NoopApi), Atlas::builtin())
    }

    #[test]
    fn test_view_cycle() {
        let mut app = app();
        assert_eq!(app.view, View::Overview);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view, View::Leaderboard);
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.view, View::Globe);
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.view, View::PartyMonth);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.handle_key(key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_progress_then_finish() {
        let mut app = app();
        app.apply(HuntEvent::Progress(FetchProgress::new(5, 10, "Scanning Chile...")));
        assert_eq!(
            app.loading,
            Some(Loading {
                percent: 50,
                label: "Scanning Chile...".to_string()
            })
        );
        assert!(app.status_text().starts_with("Scanning Chile... 50%"));

        app.apply(HuntEvent::Finished(dashboard_with(&[3, 9, 1])));
        assert!(!app.is_loading());
        assert_eq!(app.dashboard.champion().map(|c| c.holiday_count), Some(9));
        assert_eq!(app.podium().map(|p| p.len()), Some(3));
        assert!(app.rest().is_empty());
    }

    #[test]
    fn test_podium_needs_three() {
        let mut app = app();
        app.apply(HuntEvent::Finished(dashboard_with(&[3, 2])));
        assert!(app.podium().is_none());
        assert!(app.honorable_mentions().is_empty());
    }

    #[test]
    fn test_honorable_mentions_and_expand() {
        let mut app = app();
        app.apply(HuntEvent::Finished(dashboard_with(&[12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1])));
        app.view = View::Leaderboard;

        assert_eq!(app.rest().len(), 9);
        assert_eq!(app.honorable_mentions().len(), 7);

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.honorable_mentions().len(), 9);

        app.handle_key(key(KeyCode::Char('G')));
        assert_eq!(app.selected, 8);
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.selected, 6);

        app.handle_key(key(KeyCode::Char('g')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.expanded.as_deref(), Some("C4"));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.expanded, None);
    }

    #[test]
    fn test_tick_animates_only_when_ready() {
        let mut app = app();
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        app.loading = Some(Loading::default());
        let start = app.globe.center_lon;
        app.tick_at(now);
        assert_eq!(app.ticker_offset, 0);
        assert_eq!(app.globe.center_lon, start);

        app.loading = None;
        app.tick_at(now);
        assert_eq!(app.ticker_offset, 1);
        assert!((app.globe.center_lon - (start + 2.0)).abs() < 1e-9);
        assert_eq!(app.now, now);
    }

    #[test]
    fn test_globe_keys() {
        let mut app = app();
        app.view = View::Globe;
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.globe_paused);
        app.handle_key(key(KeyCode::Char('l')));
        assert!((app.globe.center_lon - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_next_holiday_skips_past_dates() {
        let mut app = app();
        app.apply(HuntEvent::Finished(dashboard_with(&[3])));
        let at = |day| {
            NaiveDate::from_ymd_opt(2025, 3, day)
                .unwrap()
                .and_hms_opt(0, 30, 0)
                .unwrap()
        };

        app.now = at(3);
        assert_eq!(app.next_holiday().map(|h| h.date.day()), Some(3));
        app.now = at(4);
        assert_eq!(app.next_holiday().map(|h| h.date.day()), Some(4));
        app.now = at(6);
        assert!(app.next_holiday().is_none());
    }

    #[test]
    fn test_failed_countries_reported() {
        let mut app = app();
        let mut dashboard = dashboard_with(&[1]);
        dashboard.countries_requested = 3;
        app.apply(HuntEvent::Finished(dashboard));
        assert_eq!(app.status_text(), "2 countries could not be fetched");
    }
}

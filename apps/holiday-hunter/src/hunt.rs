//! Background fetch-and-aggregate task.
//!
//! A hunt runs on the tokio runtime and reports back over a channel that the
//! UI loop drains every tick. Dropping a [`Hunt`] abandons whatever is still
//! in flight.

use chrono::{Datelike, Local};
use holiday_core::{
    AggregateOptions, CountrySource, Dashboard, FetchProgress, FetchStrategy, HolidayApi,
    HolidayFetcher,
};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Config;

#[derive(Debug)]
pub enum HuntEvent {
    Progress(FetchProgress),
    Finished(Dashboard),
}

#[derive(Debug, Clone, Copy)]
pub struct HuntSettings {
    pub source: CountrySource,
    pub strategy: FetchStrategy,
    pub year: i32,
    pub options: AggregateOptions,
}

impl HuntSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source: config.fetch.source,
            strategy: config.fetch.fetch_strategy(),
            year: config.fetch.year.unwrap_or_else(|| Local::now().year()),
            options: config.display.aggregate_options(),
        }
    }
}

pub struct Hunt {
    handle: JoinHandle<()>,
    events: UnboundedReceiver<HuntEvent>,
}

impl Hunt {
    /// Start a hunt. Must be called from within a tokio runtime.
    pub fn spawn(api: Arc<dyn HolidayApi>, settings: HuntSettings) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(api, settings, tx));
        Self { handle, events }
    }

    /// Drain pending events without blocking.
    pub fn poll(&mut self) -> Vec<HuntEvent> {
        let mut drained = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => drained.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        drained
    }
}

impl Drop for Hunt {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(api: Arc<dyn HolidayApi>, settings: HuntSettings, tx: UnboundedSender<HuntEvent>) {
    info!(year = settings.year, source = ?settings.source, "hunt started");
    let _ = tx.send(HuntEvent::Progress(FetchProgress::new(
        0,
        1,
        "Discovering countries...",
    )));

    let countries = settings.source.load(api.as_ref()).await;
    let fetcher = HolidayFetcher::new(api.as_ref(), settings.year, settings.strategy);
    let outcomes = fetcher
        .fetch_all(&countries, |progress| {
            let _ = tx.send(HuntEvent::Progress(progress));
        })
        .await;

    let dashboard = Dashboard::build(
        outcomes,
        settings.year,
        Local::now().naive_local(),
        settings.options,
    );
    info!(
        analyzed = dashboard.countries_analyzed(),
        failed = dashboard.countries_failed(),
        "hunt finished"
    );
    let _ = tx.send(HuntEvent::Finished(dashboard));
}

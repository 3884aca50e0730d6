//! Application state and logic

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;
use themeportal::catalog::{self, CatalogLoadError, CatalogSource, Fetcher, ThemeCatalog, UreqFetcher};
use themeportal::{AudioElement, Config, Page, Portal};
use tracing::{debug, error, info};

pub type LoadResult = Result<ThemeCatalog, CatalogLoadError>;

/// Application state
pub struct App {
    pub portal: Portal<Page, Box<dyn AudioElement>>,
    pub config: Config,
    /// Where the catalog is loaded from
    pub source: CatalogSource,
    /// In-flight catalog load, if any
    loader: Option<Receiver<LoadResult>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, source: CatalogSource, audio: Box<dyn AudioElement>) -> Self {
        let portal = Portal::new(Page::new(), audio, config.audio.volume);
        Self {
            portal,
            config,
            source,
            loader: None,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Start loading the catalog in the background
    pub fn start_load(&mut self) {
        self.start_load_with(UreqFetcher);
    }

    /// Start loading with a given fetcher; ignored while a load is in flight
    pub fn start_load_with<F: Fetcher + 'static>(&mut self, fetcher: F) {
        if self.loader.is_some() {
            debug!("load ignored: already loading");
            return;
        }

        info!("Loading theme catalog from {}", self.source);
        let (tx, rx) = mpsc::channel();
        let source = self.source.clone();
        thread::spawn(move || {
            let result = catalog::load(&source, &fetcher);
            // Receiver gone means the app quit
            let _ = tx.send(result);
        });
        self.loader = Some(rx);
    }

    /// Deliver a finished load to the portal
    pub fn check_loader(&mut self, now: Instant) {
        let Some(rx) = &self.loader else {
            return;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                error!("Catalog loader stopped without a result");
                self.loader = None;
                return;
            }
        };

        self.loader = None;
        self.portal
            .on_catalog_loaded(result, &self.config.default_theme, now);
    }

    /// Per-frame housekeeping
    pub fn tick(&mut self, now: Instant) {
        self.check_loader(now);
        self.portal.tick(now);
    }
}

pub mod animation;
pub mod carousel;
pub mod images;
pub mod router;
pub mod tmdb;

use std::sync::mpsc;
use std::time::Instant;

use chrono::{DateTime, Local};
use image::DynamicImage;
use ratatui::layout::{Position, Rect};
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use throbber_widgets_tui::ThrobberState;

use crate::config::Config;
use crate::error::AppError;
use animation::{Tween, row_offsets};
use carousel::Carousel;
use images::{ImageSize, download_image, resolve};
use router::{Navigator, lookup_movie, match_movie_route, overlay_active, selected_movie};
use tmdb::{MovieRecord, MoviesPage, fetch_now_playing_threaded};

pub enum MovieFetchMessage {
    Complete(MoviesPage),
    Error(String),
}

pub enum BackdropMessage {
    Loaded(u64, DynamicImage),
    Error(u64, String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(MoviesPage),
    Failed(String),
}

#[derive(Default)]
pub struct Backdrop {
    pub movie_id: Option<u64>,
    pub loading: bool,
    pub protocol: Option<StatefulProtocol>,
    pub error: Option<String>,
}

/// Screen regions recorded during the last draw, used to route mouse clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub banner: Rect,
    pub items: Vec<(Rect, u64)>,
    pub overlay_panel: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Banner,
    Item(u64),
    OverlayPanel,
    OverlayBackground,
    Nothing,
}

pub struct App {
    pub config: Config,
    pub load_state: LoadState,
    pub receiver: Option<mpsc::Receiver<MovieFetchMessage>>,
    pub last_updated: Option<DateTime<Local>>,
    pub carousel: Carousel,
    pub slide: Option<Tween>,
    pub focused: usize,
    pub navigator: Navigator,
    pub picker: Option<Picker>,
    pub backdrop: Backdrop,
    pub backdrop_receiver: Option<mpsc::Receiver<BackdropMessage>>,
    pub hit_areas: HitAreas,
    pub throbber_state: ThrobberState,
    pub terminal_width: u16,
}

impl App {
    pub fn new(config: Config, picker: Option<Picker>) -> Self {
        Self {
            config,
            load_state: LoadState::Loading,
            receiver: None,
            last_updated: None,
            carousel: Carousel::new(),
            slide: None,
            focused: 0,
            navigator: Navigator::new(),
            picker,
            backdrop: Backdrop::default(),
            backdrop_receiver: None,
            hit_areas: HitAreas::default(),
            throbber_state: ThrobberState::default(),
            terminal_width: 80,
        }
    }

    /// An app that opens on the error screen because setup failed.
    pub fn failed_startup(config: Config, picker: Option<Picker>, error: AppError) -> Self {
        let mut app = Self::new(config, picker);
        app.load_state = LoadState::Failed(error.to_string());
        app
    }

    /// Starts the single background fetch. Ignored while one is in flight.
    pub fn fetch_movies(&mut self) {
        if self.receiver.is_some() {
            return;
        }
        let (sender, receiver) = mpsc::channel();
        self.receiver = Some(receiver);
        self.load_state = LoadState::Loading;

        let config = self.config.clone();
        std::thread::spawn(move || {
            fetch_now_playing_threaded(config, sender);
        });
    }

    /// Manual retry, offered only from the error screen.
    pub fn retry(&mut self) {
        if matches!(self.load_state, LoadState::Failed(_)) {
            tracing::info!("retrying now playing fetch");
            self.fetch_movies();
        }
    }

    pub fn movies(&self) -> Option<&MoviesPage> {
        match &self.load_state {
            LoadState::Loaded(page) => Some(page),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// Drains the fetch and backdrop channels.
    pub fn poll_messages(&mut self) {
        if let Some(receiver) = &self.receiver {
            match receiver.try_recv() {
                Ok(message) => {
                    self.receiver = None;
                    self.on_fetch_message(message);
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.receiver = None;
                    self.on_fetch_message(MovieFetchMessage::Error(
                        "fetch worker exited without a result".to_string(),
                    ));
                }
            }
        }

        let mut finished = Vec::new();
        if let Some(receiver) = &self.backdrop_receiver {
            while let Ok(message) = receiver.try_recv() {
                finished.push(message);
            }
        }
        for message in finished {
            self.on_backdrop_message(message);
        }
    }

    pub fn on_fetch_message(&mut self, message: MovieFetchMessage) {
        match message {
            MovieFetchMessage::Complete(page) => {
                self.load_state = LoadState::Loaded(page);
                self.last_updated = Some(Local::now());
                self.carousel = Carousel::new();
                self.slide = None;
                self.focused = 0;
                self.report_missing_movie();
            }
            MovieFetchMessage::Error(error) => {
                self.load_state = LoadState::Failed(error);
            }
        }
    }

    fn on_backdrop_message(&mut self, message: BackdropMessage) {
        match message {
            BackdropMessage::Loaded(id, image) if self.backdrop.movie_id == Some(id) => {
                self.backdrop.loading = false;
                self.backdrop.protocol = self
                    .picker
                    .as_ref()
                    .map(|picker| picker.new_resize_protocol(image));
            }
            BackdropMessage::Error(id, error) if self.backdrop.movie_id == Some(id) => {
                tracing::warn!(movie_id = id, error = %error, "backdrop download failed");
                self.backdrop.loading = false;
                self.backdrop.error = Some(error);
            }
            // Stale result for a movie that is no longer selected.
            _ => {}
        }
    }

    /// Per-tick housekeeping: finishes slides and keeps the backdrop in step with the route.
    pub fn tick(&mut self, now: Instant) {
        if let Some(slide) = self.slide {
            if slide.is_finished(now) {
                self.slide = None;
                self.carousel.exit_complete();
                tracing::debug!(page_index = self.carousel.page_index(), "slide finished");
            }
        }
        if self.is_loading() {
            self.throbber_state.calc_next();
        }
        self.sync_backdrop();
    }

    pub fn advance_carousel(&mut self, now: Instant) {
        let results_len = self.movies().map(|page| page.results.len());
        if self.carousel.advance(results_len) {
            self.slide = Some(Tween::start(now, self.config.slide_duration()));
            self.focused = 0;
            tracing::debug!(page_index = self.carousel.page_index(), "carousel advancing");
        }
    }

    pub fn visible_movies(&self) -> &[MovieRecord] {
        match self.movies() {
            Some(page) => self.carousel.visible(&page.results),
            None => &[],
        }
    }

    pub fn outgoing_movies(&self) -> Option<&[MovieRecord]> {
        self.movies()
            .and_then(|page| self.carousel.outgoing(&page.results))
    }

    pub fn viewport_width(&self) -> u16 {
        self.config.viewport_width.unwrap_or(self.terminal_width)
    }

    /// Offsets of the outgoing and incoming rows while a slide runs.
    pub fn slide_offsets(&self, now: Instant) -> Option<(i32, i32)> {
        self.slide
            .map(|slide| row_offsets(slide.progress(now), self.viewport_width()))
    }

    pub fn next_item(&mut self) {
        let count = self.visible_movies().len();
        if count == 0 {
            return;
        }
        self.focused = (self.focused + 1) % count;
    }

    pub fn previous_item(&mut self) {
        let count = self.visible_movies().len();
        if count == 0 {
            return;
        }
        self.focused = if self.focused == 0 {
            count - 1
        } else {
            self.focused - 1
        };
    }

    pub fn focused_movie(&self) -> Option<&MovieRecord> {
        self.visible_movies().get(self.focused)
    }

    pub fn open_focused(&mut self) {
        if let Some(id) = self.focused_movie().map(|movie| movie.id) {
            self.open_movie(id);
        }
    }

    pub fn open_movie(&mut self, id: u64) {
        self.navigator.open_movie(id);
        self.report_missing_movie();
    }

    pub fn dismiss_overlay(&mut self) {
        if self.overlay_active() {
            self.navigator.go_home();
        }
    }

    pub fn overlay_active(&self) -> bool {
        overlay_active(self.navigator.current())
    }

    pub fn selected_movie(&self) -> Option<&MovieRecord> {
        selected_movie(self.navigator.current(), self.movies())
    }

    /// Message for an overlay whose movie id is not in the loaded page.
    pub fn overlay_error(&self) -> Option<String> {
        let movie_id = match_movie_route(self.navigator.current())?;
        let page = self.movies()?;
        lookup_movie(page, movie_id).err().map(|e| e.to_string())
    }

    fn report_missing_movie(&self) {
        if let Some(error) = self.overlay_error() {
            tracing::warn!(path = self.navigator.current(), "{}", error);
        }
    }

    fn sync_backdrop(&mut self) {
        let selected = self
            .selected_movie()
            .map(|movie| (movie.id, movie.backdrop_path.clone().unwrap_or_default()));

        let Some((id, path)) = selected else {
            if self.backdrop.movie_id.is_some() {
                self.backdrop = Backdrop::default();
                self.backdrop_receiver = None;
            }
            return;
        };
        if self.backdrop.movie_id == Some(id) {
            return;
        }

        self.backdrop = Backdrop {
            movie_id: Some(id),
            ..Backdrop::default()
        };
        if self.picker.is_none() || path.is_empty() {
            return;
        }

        let url = resolve(&self.config.image_base, &path, ImageSize::W500);
        let timeout = self.config.request_timeout();
        let (sender, receiver) = mpsc::channel();
        self.backdrop_receiver = Some(receiver);
        self.backdrop.loading = true;

        std::thread::spawn(move || {
            let message = match download_image(&url, timeout) {
                Ok(image) => BackdropMessage::Loaded(id, image),
                Err(e) => BackdropMessage::Error(id, e.to_string()),
            };
            let _ = sender.send(message);
        });
    }

    pub fn click_target(&self, column: u16, row: u16) -> ClickTarget {
        let position = Position::new(column, row);
        if self.overlay_active() {
            return match self.hit_areas.overlay_panel {
                Some(panel) if panel.contains(position) => ClickTarget::OverlayPanel,
                _ => ClickTarget::OverlayBackground,
            };
        }
        if let Some((_, id)) = self
            .hit_areas
            .items
            .iter()
            .find(|(area, _)| area.contains(position))
        {
            return ClickTarget::Item(*id);
        }
        if self.hit_areas.banner.contains(position) {
            return ClickTarget::Banner;
        }
        ClickTarget::Nothing
    }

    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) {
        match self.click_target(column, row) {
            ClickTarget::Banner => self.advance_carousel(now),
            ClickTarget::Item(id) => self.open_movie(id),
            ClickTarget::OverlayBackground => self.dismiss_overlay(),
            ClickTarget::OverlayPanel | ClickTarget::Nothing => {}
        }
    }
}

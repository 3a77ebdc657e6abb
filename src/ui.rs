mod banner;
mod carousel;
mod error;
mod footer;
mod header;
mod loading;
mod overlay;

use std::time::Instant;

use crate::app::{App, LoadState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use banner::render_banner;
use carousel::render_carousel;
use error::render_error;
use footer::render_footer;
use header::render_header;
use loading::render_loading;
use overlay::render_overlay;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    app.terminal_width = frame.area().width;
    app.hit_areas = Default::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(1),     // Content
            Constraint::Length(3),  // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let failure = match &app.load_state {
        LoadState::Failed(message) => Some(message.clone()),
        _ => None,
    };

    if app.is_loading() {
        render_loading(frame, app, chunks[1]);
    } else if let Some(message) = failure {
        render_error(frame, app, chunks[1], &message);
    } else {
        let content = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(55), // Banner
                Constraint::Min(6),         // Carousel
            ])
            .split(chunks[1]);

        render_banner(frame, app, content[0]);
        render_carousel(frame, app, content[1], Instant::now());
    }

    render_footer(frame, app, chunks[2]);

    // The overlay frame is drawn whenever the route matches, even before data arrives.
    if app.overlay_active() {
        render_overlay(frame, app, frame.area());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::ui;
    use crate::app::App;

    pub fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    pub fn text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}

use std::time::Instant;

use crate::app::App;
use crate::app::carousel::{CarouselPhase, PAGE_SIZE};
use crate::app::tmdb::MovieRecord;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Slot `index` of a `PAGE_SIZE`-wide row shifted horizontally by `dx`,
/// clipped to `area`. `None` when the slot is entirely off screen.
pub fn slot_rect(area: Rect, index: usize, dx: i32) -> Option<Rect> {
    let slot_width = (area.width / PAGE_SIZE as u16).max(1) as i32;
    let left = area.x as i32 + dx + slot_width * index as i32;
    let right = left + slot_width;

    let clipped_left = left.max(area.x as i32);
    let clipped_right = right.min(area.right() as i32);
    if clipped_right <= clipped_left {
        return None;
    }
    Some(Rect::new(
        clipped_left as u16,
        area.y,
        (clipped_right - clipped_left) as u16,
        area.height,
    ))
}

fn render_item(frame: &mut Frame, movie: &MovieRecord, area: Rect, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);

    let mut lines = vec![Line::from(Span::styled(
        movie.title.as_str(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];
    // Extra details only on the focused poster, like a hover card.
    if focused {
        if let Some(vote) = movie.vote_average {
            lines.push(Line::from(Span::styled(
                format!("★ {:.1}", vote),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    let item = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(item, area);
}

/// Renders the current carousel page, and the outgoing page while a slide runs
pub fn render_carousel(frame: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    let marker = match app.carousel.phase() {
        CarouselPhase::Advancing => " »",
        CarouselPhase::Idle => "",
    };
    let title = match app.movies() {
        Some(page) => format!(
            " Now Playing ({} movies, page {}{}) ",
            page.results.len().saturating_sub(1),
            app.carousel.page_index() + 1,
            marker
        ),
        None => " Now Playing ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (exit_dx, enter_dx) = app.slide_offsets(now).unwrap_or((0, 0));

    if let Some(outgoing) = app.outgoing_movies() {
        for (index, movie) in outgoing.iter().enumerate() {
            if let Some(slot) = slot_rect(inner, index, exit_dx) {
                render_item(frame, movie, slot, false);
            }
        }
    }

    let mut items = Vec::new();
    for (index, movie) in app.visible_movies().iter().enumerate() {
        if let Some(slot) = slot_rect(inner, index, enter_dx) {
            render_item(frame, movie, slot, index == app.focused);
            items.push((slot, movie.id));
        }
    }
    app.hit_areas.items = items;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MovieFetchMessage;
    use crate::app::tmdb::fixtures::page_of;
    use crate::config::Config;
    use crate::ui::test_support::{draw, text};

    #[test]
    fn slots_tile_the_row() {
        let area = Rect::new(2, 5, 60, 8);
        assert_eq!(slot_rect(area, 0, 0), Some(Rect::new(2, 5, 10, 8)));
        assert_eq!(slot_rect(area, 5, 0), Some(Rect::new(52, 5, 10, 8)));
    }

    #[test]
    fn shifted_slots_are_clipped() {
        let area = Rect::new(0, 0, 60, 8);
        assert_eq!(slot_rect(area, 0, -5), Some(Rect::new(0, 0, 5, 8)));
        assert_eq!(slot_rect(area, 0, -10), None);
        assert_eq!(slot_rect(area, 5, 5), Some(Rect::new(55, 0, 5, 8)));
        assert_eq!(slot_rect(area, 0, 60), None);
    }

    #[test]
    fn mid_slide_draws_both_rows() {
        let mut app = App::new(Config::default(), None);
        app.config.slide_duration_ms = 60_000;
        app.on_fetch_message(MovieFetchMessage::Complete(page_of(13)));
        app.advance_carousel(Instant::now());

        let buffer = draw(&mut app, 120, 40);
        let screen = text(&buffer);
        // Incoming row starts near the right edge, outgoing still on the left.
        assert!(screen.contains("Movie 2"));
        assert!(app.hit_areas.items.len() < PAGE_SIZE);
    }
}

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

/// Renders the full-width banner for the first movie. Clicking it advances the carousel.
pub fn render_banner(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hit_areas.banner = area;

    let Some(movie) = app.movies().and_then(|page| page.banner()) else {
        let empty = Paragraph::new("No movies are playing right now")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Featured ", Style::default().fg(Color::Red)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Big title
            Constraint::Length(1),
            Constraint::Min(1),    // Overview
        ])
        .split(inner);

    let title = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .lines(vec![movie.title.clone().into()])
        .build();
    frame.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let mut overview = vec![Line::from(Span::styled(
        movie.overview.as_str(),
        Style::default().fg(Color::Gray),
    ))];
    if let Some(date) = movie.release_date {
        overview.push(Line::from(""));
        overview.push(Line::from(Span::styled(
            format!("In theaters {}", date.format("%B %-d, %Y")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let overview = Paragraph::new(overview).wrap(Wrap { trim: true });
    frame.render_widget(overview, columns[0]);
}

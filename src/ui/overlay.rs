use crate::app::App;
use crate::app::tmdb::MovieRecord;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

/// Centered panel taking `percent_x` by `percent_y` of `area`.
pub fn centered_panel(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [panel] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    panel
}

/// Renders the movie detail overlay on top of a dimmed screen
pub fn render_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    frame
        .buffer_mut()
        .set_style(area, Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));

    let panel = centered_panel(area, 60, 80);
    app.hit_areas.overlay_panel = Some(panel);

    frame.render_widget(Clear, panel);

    let title = app
        .selected_movie()
        .map(|movie| format!(" {} ", movie.title))
        .unwrap_or_else(|| " Movie Details ".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title);
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    if app.selected_movie().is_some() {
        render_movie_info(frame, app, inner);
    } else if let Some(error) = app.overlay_error() {
        render_message(frame, inner, &error, Color::Red);
    } else if app.is_loading() {
        render_message(frame, inner, "Loading movie...", Color::Cyan);
    } else {
        render_message(frame, inner, "No movie details available", Color::Gray);
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or click outside to go back",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_movie_info(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Backdrop
            Constraint::Length(2),      // Title info
            Constraint::Min(3),         // Overview
        ])
        .split(area);

    render_backdrop(frame, chunks[0], app);

    if let Some(movie) = app.selected_movie() {
        render_title_section(frame, chunks[1], movie);
        render_overview(frame, chunks[2], movie);
    }
}

fn render_backdrop(frame: &mut Frame, area: Rect, app: &mut App) {
    if let Some(protocol) = &mut app.backdrop.protocol {
        let image = StatefulImage::<StatefulProtocol>::default()
            .resize(Resize::Fit(None));
        frame.render_stateful_widget(image, area, protocol);
        return;
    }

    let message = if app.backdrop.loading {
        "Downloading backdrop...".to_string()
    } else if let Some(error) = &app.backdrop.error {
        format!("Backdrop unavailable: {}", error)
    } else {
        "No backdrop available".to_string()
    };

    let placeholder = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(placeholder, area);
}

fn render_title_section(frame: &mut Frame, area: Rect, movie: &MovieRecord) {
    let mut details = Vec::new();
    if let Some(date) = movie.release_date {
        details.push(Span::styled("Released: ", Style::default().fg(Color::Gray)));
        details.push(Span::styled(
            date.format("%Y-%m-%d").to_string(),
            Style::default().fg(Color::White),
        ));
    }
    if let Some(vote) = movie.vote_average {
        if !details.is_empty() {
            details.push(Span::raw(" | "));
        }
        details.push(Span::styled("Rating: ", Style::default().fg(Color::Gray)));
        details.push(Span::styled(
            format!("{:.1}", vote),
            Style::default().fg(get_rating_color(vote)).add_modifier(Modifier::BOLD),
        ));
    }

    let title_info = vec![
        Line::from(Span::styled(
            movie.title.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(details),
    ];

    frame.render_widget(Paragraph::new(title_info), area);
}

fn render_overview(frame: &mut Frame, area: Rect, movie: &MovieRecord) {
    let overview = if movie.overview.is_empty() {
        Span::styled("No overview available", Style::default().fg(Color::Gray))
    } else {
        Span::styled(movie.overview.as_str(), Style::default().fg(Color::White))
    };

    let paragraph = Paragraph::new(Line::from(overview)).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Helper function to get color based on TMDB vote average
fn get_rating_color(vote: f64) -> Color {
    if vote >= 7.0 {
        Color::Green
    } else if vote >= 5.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

use crate::app::App;
use crate::config::config_file_path;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

/// Renders the failed-load screen, with setup steps when the API key is missing
pub fn render_error(frame: &mut Frame, app: &App, area: Rect, error: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Big text
            Constraint::Min(5),     // Instructions
        ])
        .split(area);

    let missing_key = app.config.api_key.is_none() && error.contains("TMDB_API_KEY");
    let bad_config = !missing_key && error.starts_with("configuration error");

    let headline: Vec<Line> = if missing_key {
        vec!["API KEY".into(), "REQUIRED!".into()]
    } else {
        vec!["LOAD".into(), "FAILED".into()]
    };

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .lines(headline)
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[0]);

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to fetch now playing movies",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
    ];

    if missing_key {
        text.extend([
            Line::from(Span::styled(
                "1. Get a free key at: https://www.themoviedb.org/settings/api",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "2. Set environment variable: export TMDB_API_KEY=your_key_here",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "3. Restart the application",
                Style::default().fg(Color::White),
            )),
        ]);
    } else if bad_config {
        let location = config_file_path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "config.json".to_string());
        text.push(Line::from(Span::styled(
            "Fix the config file, then restart the application",
            Style::default().fg(Color::Yellow),
        )));
        text.push(Line::from(Span::styled(location, Style::default().fg(Color::Gray))));
    } else {
        text.push(Line::from(Span::styled(
            "Check your network connection, then press (r) to retry",
            Style::default().fg(Color::Yellow),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, chunks[1]);
}

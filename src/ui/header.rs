use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the header/title block at the top of the screen
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let mut spans = vec![Span::styled("Now Playing", Style::default().fg(Color::Red))];

    if let Some(dates) = app.movies().and_then(|page| page.dates.as_ref()) {
        spans.push(Span::styled(
            format!("  {} to {}", dates.minimum.format("%b %-d"), dates.maximum.format("%b %-d")),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(updated) = app.last_updated {
        spans.push(Span::styled(
            format!("  (updated {})", updated.format("%I:%M %p")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(title_block);

    frame.render_widget(title, area);
}

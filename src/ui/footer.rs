use crate::app::{App, LoadState};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.overlay_active() {
        return "(Esc) or click outside to close, (q) quit";
    }
    match app.load_state {
        LoadState::Loading => "Loading movies... (q) to quit",
        LoadState::Failed(_) => "(r) to retry, (q) to quit",
        LoadState::Loaded(_) => {
            "(Space) or click banner: next page, (←→/hl) select, (Enter) details, (q) quit"
        }
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom = Paragraph::new(Text::styled(instruction_text, Style::default()))
        .block(bottom_block);

    frame.render_widget(bottom, area);
}

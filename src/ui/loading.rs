use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber};

/// Renders the loading placeholder while the now playing fetch is pending
pub fn render_loading(frame: &mut Frame, app: &mut App, area: Rect) {
    let loading_block = Block::default()
        .title("Loading Movies")
        .borders(Borders::ALL)
        .style(Style::default());

    let inner = loading_block.inner(area);
    frame.render_widget(loading_block, area);

    let [line] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(inner);
    let [line] = Layout::horizontal([Constraint::Length(32)])
        .flex(Flex::Center)
        .areas(line);

    let throbber = Throbber::default()
        .label("Loading now playing...")
        .style(Style::default().fg(Color::White))
        .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX);

    frame.render_stateful_widget(throbber, line, &mut app.throbber_state);
}

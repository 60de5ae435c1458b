pub mod detail_panel;
pub mod footer;
pub mod header;
pub mod theme;
pub mod ticket_list;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub fn error_banner_text(error: &str, base_url: &str) -> String {
    format!("{error} - please ensure the ticket service is running on {base_url}.")
}

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let banner_height = if app.tickets.error.is_some() { 4 } else { 0 };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // summary header
            Constraint::Length(banner_height), // error banner
            Constraint::Min(6),                // tickets + details
            Constraint::Length(1),             // footer
        ])
        .split(area);

    header::render(f, vertical[0], app);

    if let Some(error) = &app.tickets.error {
        let banner = Paragraph::new(Line::raw(error_banner_text(error, &app.base_url)))
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(banner, vertical[1]);
    }

    // Tickets (60%) + Detail (40%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[2]);

    ticket_list::render(f, horizontal[0], app);
    detail_panel::render(f, horizontal[1], app);
    footer::render(f, vertical[3], app);
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::theme::ACCENT;
use crate::util::format::pluralize;

pub fn refresh_label(loading: bool) -> &'static str {
    if loading {
        "Refreshing..."
    } else {
        "Refresh"
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let active = app.tickets.active_tickets().len();
    let total = app.tickets.tickets.len();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Terraform Agent Tickets ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)])
        .split(inner);

    let summary = vec![
        Line::from(Span::styled(
            pluralize(active, "active ticket"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Monitoring {}", pluralize(total, "total ticket")),
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(summary), columns[0]);

    let button_style = if app.tickets.is_loading() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let button = Paragraph::new(Line::from(vec![
        Span::styled("[r] ", Style::default().fg(Color::DarkGray)),
        Span::styled(refresh_label(app.tickets.is_loading()), button_style),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(button, columns[1]);
}

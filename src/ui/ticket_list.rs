use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{status_color, ACCENT};
use crate::util::format::{format_status, format_timestamp, truncate};

pub const EMPTY_STATE: &str =
    "No tickets yet. Use the assistant or /api/chat to create one, then refresh.";
pub const NO_ACTIVE: &str = "No active tickets (press a to show all).";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.show_closed {
        " Tickets "
    } else {
        " Tickets (active) "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title);

    let tickets = app.visible_tickets();

    if tickets.is_empty() && !app.tickets.is_loading() {
        // Only an empty collection is "no tickets"; a filtered-out one is not.
        let message = if app.tickets.tickets.is_empty() {
            EMPTY_STATE
        } else {
            NO_ACTIVE
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Gray),
        )))
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    }

    let max_title = area.width.saturating_sub(24) as usize;
    let items: Vec<ListItem> = tickets
        .iter()
        .enumerate()
        .map(|(i, ticket)| {
            let selected = i == app.selected;
            let title_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let heading = Line::from(vec![
                Span::styled(
                    format!("{} ", format_status(ticket.status).to_uppercase()),
                    Style::default().fg(status_color(ticket.status)),
                ),
                Span::styled(truncate(ticket.title(), max_title), title_style),
            ]);
            let requested = Line::from(Span::styled(
                format!(
                    "  Requested by {} · Workspace {}",
                    ticket.requested_by, ticket.terraform_workspace
                ),
                Style::default().fg(Color::Gray),
            ));
            let stage = Line::from(vec![
                Span::styled("  Stage ", Style::default().fg(Color::DarkGray)),
                Span::raw(ticket.current_stage.clone()),
                Span::styled(" · Env ", Style::default().fg(Color::DarkGray)),
                Span::raw(ticket.environment.clone()),
                Span::styled(" · Updated ", Style::default().fg(Color::DarkGray)),
                Span::raw(format_timestamp(&ticket.updated_at)),
            ]);

            ListItem::new(vec![heading, requested, stage, Line::raw("")])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("▌");
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{flag_color, status_color, ACCENT};
use crate::util::format::{format_status, format_timestamp};

fn field<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::raw(value.into()),
    ])
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(title, Style::default().fg(ACCENT)))
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Details ");

    let Some(ticket) = app.selected_ticket() else {
        f.render_widget(block, area);
        return;
    };

    let mut lines: Vec<Line> = vec![
        field("Ticket", ticket.ticket_id.clone()),
        field("Thread", ticket.thread_id.clone()),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_status(ticket.status),
                Style::default().fg(status_color(ticket.status)),
            ),
        ]),
        field("Cloud", ticket.target_cloud.clone()),
        field("Created", format_timestamp(&ticket.created_at)),
        field("Updated", format_timestamp(&ticket.updated_at)),
        Line::raw(""),
        section("Git"),
        field("Repo", ticket.git.repo_url.clone()),
        field("Branch", ticket.git.branch.clone()),
    ];
    if let Some(commit) = &ticket.git.commit {
        lines.push(field("Commit", commit.chars().take(12).collect::<String>()));
    }
    if let Some(path) = &ticket.git.path {
        lines.push(field("Path", path.clone()));
    }

    if !ticket.flags.is_empty() {
        lines.push(Line::raw(""));
        lines.push(section("Flags"));
        for (name, on) in &ticket.flags {
            lines.push(Line::from(vec![
                Span::styled(format!("{name}: "), Style::default().fg(Color::Gray)),
                Span::styled(
                    if *on { "on" } else { "off" },
                    Style::default().fg(flag_color(*on)),
                ),
            ]));
        }
    }

    if !ticket.constraints.is_empty() {
        lines.push(Line::raw(""));
        lines.push(section("Constraints"));
        for (key, value) in &ticket.constraints {
            lines.push(field(key, value.to_string()));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

use ratatui::style::Color;

use crate::model::ticket::TicketStatus;

pub const ACCENT: Color = Color::Rgb(0x63, 0x66, 0xF1);

pub fn status_color(status: TicketStatus) -> Color {
    match status {
        TicketStatus::Draft | TicketStatus::Design => Color::Gray,
        TicketStatus::Coding | TicketStatus::PlanPending => Color::Cyan,
        TicketStatus::Review => Color::Blue,
        TicketStatus::AwaitingApproval => Color::Yellow,
        TicketStatus::Approved | TicketStatus::Applied => Color::Green,
        TicketStatus::DriftDetected => Color::Red,
        TicketStatus::Closed => Color::DarkGray,
    }
}

pub fn flag_color(on: bool) -> Color {
    if on {
        Color::Green
    } else {
        Color::DarkGray
    }
}

use std::sync::Arc;
use std::time::Instant;

use crate::event::KeyAction;
use crate::model::ticket::DeploymentTicket;
use crate::sync::{LoadStatus, TicketSync, TicketsSnapshot};

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    Snapshot(TicketsSnapshot),
    Quit,
}

pub struct App {
    pub tickets: TicketsSnapshot,
    pub selected: usize,
    /// When false the list only shows active tickets.
    pub show_closed: bool,
    pub base_url: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    sync: Arc<TicketSync>,
}

impl App {
    pub fn new(sync: Arc<TicketSync>, base_url: impl Into<String>) -> Self {
        Self {
            tickets: sync.snapshot(),
            selected: 0,
            show_closed: true,
            base_url: base_url.into(),
            flash_message: None,
            should_quit: false,
            sync,
        }
    }

    pub fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Tick => {}
            Action::Snapshot(snapshot) => self.apply_snapshot(snapshot),
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn handle_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyAction::Down => {
                let len = self.visible_tickets().len();
                if len > 0 && self.selected < len - 1 {
                    self.selected += 1;
                }
            }
            KeyAction::Refresh => self.refresh(),
            KeyAction::ToggleClosed => {
                self.show_closed = !self.show_closed;
                let label = if self.show_closed { "all" } else { "active only" };
                self.flash_message = Some((format!("Showing {label}"), Instant::now()));
                self.clamp_selection();
            }
        }
    }

    /// Start a load without waiting for it; its snapshots arrive as actions.
    pub fn refresh(&self) {
        self.sync.spawn_load();
    }

    fn apply_snapshot(&mut self, snapshot: TicketsSnapshot) {
        // Each finished load bumps `settled`, even when the Loading state was coalesced away.
        if snapshot.status == LoadStatus::Error && snapshot.settled != self.tickets.settled {
            if let Some(msg) = &snapshot.error {
                self.flash_message = Some((format!("Fetch error: {msg}"), Instant::now()));
            }
        }
        self.tickets = snapshot;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tickets().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Rows shown in the list, in backend order.
    pub fn visible_tickets(&self) -> Vec<&DeploymentTicket> {
        if self.show_closed {
            self.tickets.tickets.iter().collect()
        } else {
            self.tickets.active_tickets()
        }
    }

    pub fn selected_ticket(&self) -> Option<&DeploymentTicket> {
        self.visible_tickets().get(self.selected).copied()
    }
}

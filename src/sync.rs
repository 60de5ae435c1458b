use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use crate::model::ticket::DeploymentTicket;
use crate::providers::TicketSource;

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Error,
}

/// Immutable view of the ticket collection and its load state.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketsSnapshot {
    pub tickets: Arc<Vec<DeploymentTicket>>,
    pub status: LoadStatus,
    pub error: Option<String>,
    /// Number of loads that have finished, successfully or not.
    pub settled: u64,
}

impl Default for TicketsSnapshot {
    fn default() -> Self {
        Self {
            tickets: Arc::new(Vec::new()),
            status: LoadStatus::Idle,
            error: None,
            settled: 0,
        }
    }
}

impl TicketsSnapshot {
    /// Tickets that are not closed, in source order.
    pub fn active_tickets(&self) -> Vec<&DeploymentTicket> {
        self.tickets.iter().filter(|t| t.is_active()).collect()
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

/// Owns the dashboard's copy of the ticket collection.
///
/// Every state change publishes a fresh [`TicketsSnapshot`] to subscribers.
/// `load` takes `&self`, so callers may run several loads at once: there is no
/// in-flight guard and no cancellation, and whichever response resolves last
/// determines the final state.
pub struct TicketSync {
    source: Box<dyn TicketSource>,
    state: watch::Sender<TicketsSnapshot>,
    generation: AtomicU64,
}

impl TicketSync {
    pub fn new(source: Box<dyn TicketSource>) -> Self {
        let (state, _) = watch::channel(TicketsSnapshot::default());
        Self {
            source,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TicketsSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TicketsSnapshot {
        self.state.borrow().clone()
    }

    pub async fn load(&self) {
        let load_id = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        info!(load_id, source = self.source.name(), "loading tickets");

        self.state.send_modify(|s| {
            s.status = LoadStatus::Loading;
            s.error = None;
        });

        match self.source.fetch_tickets().await {
            Ok(tickets) => {
                info!(load_id, count = tickets.len(), "tickets loaded");
                self.state.send_modify(|s| {
                    s.tickets = Arc::new(tickets);
                    s.status = LoadStatus::Idle;
                    s.settled += 1;
                });
            }
            Err(err) => {
                error!(load_id, kind = err.kind(), error = %err, "failed to load tickets");
                let mut message = err.to_string();
                if message.is_empty() {
                    message = UNKNOWN_ERROR.to_string();
                }
                self.state.send_modify(|s| {
                    s.error = Some(message);
                    s.status = LoadStatus::Error;
                    s.settled += 1;
                });
            }
        }
    }

    /// Run `load` on its own task so the caller is not blocked.
    pub fn spawn_load(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let sync = Arc::clone(self);
        tokio::spawn(async move { sync.load().await })
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Source-control location of the infrastructure code behind a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitReference {
    pub repo_url: String,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Lifecycle stage of a ticket. Transitions are driven by the backend only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Draft,
    Design,
    Coding,
    PlanPending,
    Review,
    AwaitingApproval,
    Approved,
    Applied,
    DriftDetected,
    Closed,
}

impl TicketStatus {
    #[cfg(test)]
    pub const ALL: [TicketStatus; 10] = [
        TicketStatus::Draft,
        TicketStatus::Design,
        TicketStatus::Coding,
        TicketStatus::PlanPending,
        TicketStatus::Review,
        TicketStatus::AwaitingApproval,
        TicketStatus::Approved,
        TicketStatus::Applied,
        TicketStatus::DriftDetected,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Draft => "draft",
            TicketStatus::Design => "design",
            TicketStatus::Coding => "coding",
            TicketStatus::PlanPending => "plan_pending",
            TicketStatus::Review => "review",
            TicketStatus::AwaitingApproval => "awaiting_approval",
            TicketStatus::Approved => "approved",
            TicketStatus::Applied => "applied",
            TicketStatus::DriftDetected => "drift_detected",
            TicketStatus::Closed => "closed",
        }
    }

    /// Human form of the stage, e.g. `plan pending`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_active(&self) -> bool {
        *self != TicketStatus::Closed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentTicket {
    pub ticket_id: String,
    pub thread_id: String,
    pub status: TicketStatus,
    pub requested_by: String,
    pub environment: String,
    pub target_cloud: String,
    pub terraform_workspace: String,
    pub git: GitReference,
    #[serde(default)]
    pub intent_summary: String,
    /// Opaque to the dashboard; rendered but never interpreted.
    #[serde(default)]
    pub constraints: Map<String, Value>,
    pub current_stage: String,
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    pub created_at: String,
    pub updated_at: String,
}

impl DeploymentTicket {
    /// Row title: the intent summary, or the ticket id when there is none.
    pub fn title(&self) -> &str {
        if self.intent_summary.is_empty() {
            &self.ticket_id
        } else {
            &self.intent_summary
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
pub(crate) fn sample_ticket(id: &str, status: TicketStatus) -> DeploymentTicket {
    DeploymentTicket {
        ticket_id: id.to_string(),
        thread_id: format!("thread-{id}"),
        status,
        requested_by: "alice@example.com".into(),
        environment: "dev".into(),
        target_cloud: "azure".into(),
        terraform_workspace: "homelab".into(),
        git: GitReference {
            repo_url: "https://github.com/example/infra".into(),
            branch: "main".into(),
            commit: None,
            path: None,
        },
        intent_summary: format!("Provision {id}"),
        constraints: Map::new(),
        current_stage: "planning".into(),
        flags: BTreeMap::new(),
        created_at: "2025-01-01T10:00:00Z".into(),
        updated_at: "2025-01-02T12:30:00Z".into(),
    }
}

use async_trait::async_trait;

use super::TicketSource;
use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::model::ticket::DeploymentTicket;

pub const TICKETS_PATH: &str = "/api/tickets";

/// Reads tickets from the orchestration backend's HTTP API.
pub struct BackendSource {
    client: ApiClient,
}

impl BackendSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl TicketSource for BackendSource {
    fn name(&self) -> &str {
        "backend"
    }

    async fn fetch_tickets(&self) -> Result<Vec<DeploymentTicket>, ApiError> {
        self.client
            .fetch_json(
                TICKETS_PATH,
                RequestOptions::default().header("accept", "application/json"),
            )
            .await
    }
}

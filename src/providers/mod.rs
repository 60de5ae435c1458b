pub mod backend;

use async_trait::async_trait;

use crate::api::ApiError;
use crate::model::ticket::DeploymentTicket;

/// Where the dashboard gets its ticket collection from.
#[async_trait]
pub trait TicketSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_tickets(&self) -> Result<Vec<DeploymentTicket>, ApiError>;
}

#[cfg(test)]
pub mod tests;

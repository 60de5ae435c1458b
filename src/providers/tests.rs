use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::backend::{BackendSource, TICKETS_PATH};
use super::TicketSource;
use crate::api::{ApiClient, ApiError};
use crate::model::ticket::{sample_ticket, DeploymentTicket, TicketStatus};

type Reply = Result<Vec<DeploymentTicket>, ApiError>;

/// A scripted source: each fetch pops the next reply, optionally after a delay.
pub(crate) struct MockSource {
    replies: Mutex<VecDeque<(Duration, Reply)>>,
    pub calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.reply_after(Duration::ZERO, reply)
    }

    pub fn reply_after(self, delay: Duration, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back((delay, reply));
        self
    }
}

#[async_trait]
impl TicketSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_tickets(&self) -> Result<Vec<DeploymentTicket>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some((delay, reply)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                reply
            }
            None => Err(ApiError::Request {
                status: 503,
                message: "no scripted reply".into(),
            }),
        }
    }
}

#[tokio::test]
async fn mock_source_replays_in_order() {
    let source = MockSource::new()
        .reply(Ok(vec![sample_ticket("A", TicketStatus::Draft)]))
        .reply(Err(ApiError::Request {
            status: 500,
            message: "boom".into(),
        }));

    assert_eq!(source.fetch_tickets().await.unwrap().len(), 1);
    assert!(source.fetch_tickets().await.is_err());
    assert!(source.fetch_tickets().await.is_err());
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn backend_source_reads_ticket_endpoint() {
    let server = MockServer::start().await;
    let tickets = vec![
        sample_ticket("T-1", TicketStatus::Closed),
        sample_ticket("T-2", TicketStatus::Approved),
    ];
    Mock::given(method("GET"))
        .and(path(TICKETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(tickets)))
        .expect(1)
        .mount(&server)
        .await;

    let source = BackendSource::new(ApiClient::new(Some(&format!("{}/", server.uri()))));
    assert_eq!(source.base_url(), server.uri());

    let fetched = source.fetch_tickets().await.unwrap();
    assert_eq!(fetched, tickets);
}

#[tokio::test]
async fn backend_source_rejects_unknown_status() {
    let server = MockServer::start().await;
    let mut ticket = json!(sample_ticket("T-1", TicketStatus::Draft));
    ticket["status"] = json!("exploded");
    Mock::given(method("GET"))
        .and(path(TICKETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ticket])))
        .mount(&server)
        .await;

    let source = BackendSource::new(ApiClient::new(Some(&server.uri())));
    let err = source.fetch_tickets().await.unwrap_err();
    assert_eq!(err.kind(), "parse");
}

#[tokio::test]
async fn sync_over_backend_keeps_tickets_when_server_fails() {
    use crate::sync::{LoadStatus, TicketSync};

    let server = MockServer::start().await;
    let tickets = vec![sample_ticket("T-1", TicketStatus::Coding)];
    Mock::given(method("GET"))
        .and(path(TICKETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(tickets)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TICKETS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let sync = TicketSync::new(Box::new(BackendSource::new(ApiClient::new(Some(
        &server.uri(),
    )))));

    sync.load().await;
    assert_eq!(sync.snapshot().status, LoadStatus::Idle);

    sync.load().await;
    let snap = sync.snapshot();
    assert_eq!(snap.status, LoadStatus::Error);
    assert_eq!(
        snap.error.as_deref(),
        Some("Request failed (500): server error")
    );
    assert_eq!(*snap.tickets, tickets);
}

use std::{
    net::IpAddr,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for RelayCredentials {
    fn default() -> Self {
        Self {
            service_id: "test-service".into(),
            template_id: "test-template".into(),
            public_key: "test-public-key".into(),
        }
    }
}

/// A message as received by the testing relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub time: String,
    pub to_name: String,
}

#[derive(Debug, Clone)]
pub struct RelayServer {
    credentials: Arc<RelayCredentials>,
    reject: bool,
    inbox: Arc<Mutex<Vec<ReceivedMessage>>>,
}

impl RelayServer {
    pub fn new(credentials: RelayCredentials, reject: bool) -> Self {
        Self {
            credentials: credentials.into(),
            reject,
            inbox: Default::default(),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(SEND_ROUTE, routing::post(send))
            .with_state(self.clone())
    }

    /// Returns all messages accepted so far.
    pub fn received(&self) -> Vec<ReceivedMessage> {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    credentials: RelayCredentials,
    reject: bool,
) -> anyhow::Result<()> {
    info!("Starting mail relay testing server on {host}:{port}");
    info!("Mail relay send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Credentials: {credentials:?}");
    if reject {
        info!("All messages will be rejected");
    }

    let router = RelayServer::new(credentials, reject).router();

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: ReceivedMessage,
}

async fn send(
    State(server): State<RelayServer>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    if server.reject {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "The relay is not accepting messages",
        );
    }

    let credentials = &*server.credentials;
    if request.service_id != credentials.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid");
    }
    if request.template_id != credentials.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID is invalid");
    }
    if request.user_id != credentials.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }

    info!(
        from_name = %request.template_params.from_name,
        from_email = %request.template_params.from_email,
        "Received contact message"
    );
    server
        .inbox
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request.template_params);

    (StatusCode::OK, "OK")
}

use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub const SUBMISSION_ROUTE: &str = "/api/sendgrid";
pub const RECEIVED_ROUTE: &str = "/_testing/received";

/// Messages with this subject are rejected by the relay.
pub const REJECTED_SUBJECT: &str = "fail";

pub async fn start_server(host: IpAddr, port: u16) -> anyhow::Result<()> {
    info!("Starting mail relay testing server on {host}:{port}");
    info!("Submission endpoint: http://{host}:{port}{SUBMISSION_ROUTE}");
    info!("Received messages: http://{host}:{port}{RECEIVED_ROUTE}");
    info!("Messages with empty fields or the subject {REJECTED_SUBJECT:?} are rejected.");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    serve(listener).await
}

/// Serve the relay on an already bound listener.
pub async fn serve(listener: TcpListener) -> anyhow::Result<()> {
    axum::serve(listener, router())
        .await
        .context("Failed to start HTTP server")
}

pub fn router() -> Router<()> {
    Router::new()
        .route(SUBMISSION_ROUTE, routing::post(send))
        .route(RECEIVED_ROUTE, routing::get(received))
        .with_state(Default::default())
}

/// The request body the relay accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayMessage {
    pub email: String,
    pub fullname: String,
    pub subject: String,
    pub message: String,
}

type RelayState = State<Arc<StateInner>>;

#[derive(Default)]
struct StateInner {
    received: RwLock<Vec<RelayMessage>>,
}

async fn send(state: RelayState, Json(message): Json<RelayMessage>) -> Response {
    let has_empty_field = [
        &message.email,
        &message.fullname,
        &message.subject,
        &message.message,
    ]
    .into_iter()
    .any(|x| x.is_empty());

    if has_empty_field {
        warn!("Rejecting message with empty fields");
        return reject("All fields are required");
    }

    if message.subject == REJECTED_SUBJECT {
        warn!("Rejecting message from {}", message.email);
        return reject("Mail provider refused the message");
    }

    info!("Accepted message from {} <{}>", message.fullname, message.email);
    state.received.write().await.push(message);

    Json(json!({ "error": "" })).into_response()
}

async fn received(state: RelayState) -> Json<Vec<RelayMessage>> {
    Json(state.received.read().await.clone())
}

fn reject(error: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error })),
    )
        .into_response()
}

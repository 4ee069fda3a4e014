// SPDX-License-Identifier: MIT

//! HTTP host for a single flow

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::flow::executor::Flow;
use crate::node::{FlowError, Message};

pub fn router(flow: Arc<Flow>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/nodes", get(list_nodes))
        .route("/api/state", get(get_state))
        .route("/api/state/{name}", get(get_substate))
        .route("/api/nodes/{id}/inject", post(inject))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(flow)
}

pub async fn serve(
    flow: Arc<Flow>,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(flow);

    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_nodes(State(flow): State<Arc<Flow>>) -> Json<Value> {
    let nodes: Vec<Value> = flow
        .nodes()
        .map(|n| {
            json!({
                "id": n.id(),
                "type": n.kind(),
                "outputs": n.outputs(),
            })
        })
        .collect();
    Json(json!({ "flow": flow.name(), "nodes": nodes }))
}

async fn get_state(State(flow): State<Arc<Flow>>) -> Json<Value> {
    Json(flow.state().snapshot().await)
}

async fn get_substate(State(flow): State<Arc<Flow>>, Path(name): Path<String>) -> Response {
    match flow.state().get(&name).await {
        Some(substate) => Json(substate).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Substate '{}' not found", name) })),
        )
            .into_response(),
    }
}

async fn inject(
    State(flow): State<Arc<Flow>>,
    Path(id): Path<String>,
    Json(msg): Json<Message>,
) -> Response {
    match flow.inject(&id, msg).await {
        Ok(dispatch) => Json(dispatch).into_response(),
        Err(e @ FlowError::UnknownNode(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
        Err(e) => {
            log::error!("Dispatch failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

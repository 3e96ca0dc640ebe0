// src/handlers/api.rs
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::models::{Chain, LinkEntry, LinkGroup, LinkKind};
use crate::services::health::IntegrityReport;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: &'static str,
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Chain>,
    pub label: &'static str,
    pub group: LinkGroup,
    pub value: String,
    pub placeholder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

impl From<&LinkEntry> for LinkResponse {
    fn from(entry: &LinkEntry) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind,
            chain: entry.chain,
            label: entry.label,
            group: entry.group,
            value: entry.value.clone(),
            placeholder: entry.is_placeholder(),
            explorer_url: entry.explorer_url(),
        }
    }
}

/// `GET /api/links`: the official registry in registration order.
pub async fn list_links(State(state): State<Arc<AppState>>) -> Json<Vec<LinkResponse>> {
    Json(state.renderer.links().iter().map(LinkResponse::from).collect())
}

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub hub_base_url: String,
    pub integrity: IntegrityReport,
}

/// `GET /api/health`
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        hub_base_url: state.config.hub_base_url.clone(),
        integrity: state.report.clone(),
    })
}

//! Addon protocol endpoints: manifest and stream lookup.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use streamfinder_core::{ContentKind, StreamRecord};
use tracing::info;

use crate::metrics::record_stream_request;
use crate::state::AppState;

/// Addon manifest as fetched by the host application.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    #[serde(rename = "idPrefixes")]
    pub id_prefixes: Vec<&'static str>,
    pub catalogs: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<StreamRecord>,
}

pub async fn manifest(State(state): State<Arc<AppState>>) -> Json<Manifest> {
    let addon = state.addon();
    Json(Manifest {
        id: addon.id.clone(),
        version: addon.version.clone(),
        name: addon.name.clone(),
        description: addon.description.clone(),
        logo: addon.logo.clone(),
        resources: vec!["stream"],
        types: vec!["movie", "series"],
        id_prefixes: vec!["tt", "kitsu"],
        catalogs: Vec::new(),
    })
}

/// Resolve streams for `/stream/{type}/{id}`.
///
/// Always answers 200; nothing found is an empty list.
pub async fn streams(
    State(state): State<Arc<AppState>>,
    Path((stream_type, id)): Path<(String, String)>,
) -> Json<StreamsResponse> {
    let id = id.strip_suffix(".json").unwrap_or(&id);
    let kind = ContentKind::from_stream_type(&stream_type);
    info!(stream_type = %stream_type, id, "Stream request");

    let resolution = state.pipeline().resolve(kind, id).await;
    record_stream_request(
        &stream_type,
        resolution.streams.len(),
        resolution.attempts,
        resolution.from_cache,
    );

    Json(StreamsResponse {
        streams: resolution.streams,
    })
}

//! Tag minting, lookup, claim, and short-code redirect API.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use serde::Deserialize;
use serde_json::{Value, json};
use tag_db::DbError;

use super::err_json;
use crate::app::SharedState;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Largest batch a single mint request may create.
const MAX_MINT_BATCH: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct MintRequest {
    pub count: usize,
}

/// POST /api/tags/batch
pub async fn mint_batch(
    State(state): State<SharedState>,
    Json(req): Json<MintRequest>,
) -> ApiResult {
    if req.count == 0 || req.count > MAX_MINT_BATCH {
        return Err(err_json(
            400,
            &format!("count must be between 1 and {MAX_MINT_BATCH}"),
        ));
    }

    let codes = state
        .db()
        .mint_tags(req.count)
        .map_err(|e| err_json(500, &e.to_string()))?;
    let count = codes.len();
    Ok(Json(json!({ "codes": codes, "count": count })))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// GET /api/tags
pub async fn list_tags(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> ApiResult {
    let limit = query.limit.unwrap_or(50).min(500);
    let offset = query.offset.unwrap_or(0);

    let tags = state
        .db()
        .list_tags(limit, offset)
        .map_err(|e| err_json(500, &e.to_string()))?;
    let total = state
        .db()
        .tag_count()
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "tags": tags, "total": total })))
}

/// GET /api/tags/:code
pub async fn get_tag(State(state): State<SharedState>, Path(code): Path<String>) -> ApiResult {
    let tag = state
        .db()
        .tag(&code)
        .map_err(|e| err_json(500, &e.to_string()))?
        .ok_or_else(|| err_json(404, &format!("tag {code} not found")))?;
    Ok(Json(json!({ "tag": tag })))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub pet_id: String,
}

/// POST /api/tags/:code/assign
pub async fn assign_tag(
    State(state): State<SharedState>,
    Path(code): Path<String>,
    Json(req): Json<AssignRequest>,
) -> ApiResult {
    if req.pet_id.trim().is_empty() {
        return Err(err_json(400, "pet_id must not be empty"));
    }

    match state.db().assign_tag(&code, req.pet_id.trim()) {
        Ok(()) => Ok(Json(json!({ "code": code, "pet_id": req.pet_id.trim() }))),
        Err(DbError::NotFound(_)) => Err(err_json(404, &format!("tag {code} not found"))),
        Err(DbError::InvalidData(msg)) => Err(err_json(409, &msg)),
        Err(e) => Err(err_json(500, &e.to_string())),
    }
}

/// GET /t/:code
///
/// The destination every printed QR encodes. Assigned tags land on the pet
/// profile; unassigned tags land on the claim page.
pub async fn redirect_tag(
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Redirect, (StatusCode, Json<Value>)> {
    let base_url = {
        let config = state.config().await;
        config.public_base_url.clone()
    };

    let tag = state
        .db()
        .tag(&code)
        .map_err(|e| err_json(500, &e.to_string()))?
        .ok_or_else(|| err_json(404, &format!("tag {code} not found")))?;

    let target = match &tag.pet_id {
        Some(pet_id) => format!("{base_url}/pets/{pet_id}"),
        None => format!("{base_url}/claim/{code}"),
    };
    Ok(Redirect::temporary(&target))
}

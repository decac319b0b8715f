//! Handlers for the `videos` resource. Each one performs a single store call.
//!
//! Store calls are synchronous and may touch the filesystem, so they run on
//! tokio's blocking pool rather than on a runtime worker.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;
use crate::store::{Collection, CollectionExt, DocumentStore, RemoveOutcome, UpdateOutcome};
use crate::video::{Video, VideoInput, COLLECTION};

/// Run `op` against the `videos` collection on a blocking thread.
async fn with_videos<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(Collection<'_, dyn DocumentStore>) -> Result<T, ApiError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(store.collection(COLLECTION))).await?
}

/// `GET /health` — returns `{ "ok": true, "videos": <count> }`.
pub(super) async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let count = with_videos(&state, |videos| Ok(videos.find_all()?.len())).await?;
    Ok(Json(json!({ "ok": true, "videos": count })))
}

/// `GET /api/videos`
pub(super) async fn list_videos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Video>>, ApiError> {
    let videos = with_videos(&state, |videos| {
        Ok(videos
            .find_all()?
            .into_iter()
            .map(Video::from_document)
            .collect::<Result<Vec<_>, _>>()?)
    })
    .await?;
    Ok(Json(videos))
}

/// `POST /api/videos`
pub(super) async fn create_video(
    State(state): State<AppState>,
    payload: Result<Json<VideoInput>, JsonRejection>,
) -> Result<Json<Video>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let doc = with_videos(&state, move |videos| Ok(videos.insert(input.into_fields())?)).await?;
    Ok(Json(Video::from_document(doc)?))
}

/// `GET /api/videos/:id`
pub(super) async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Video>, ApiError> {
    let doc = with_videos(&state, move |videos| {
        videos.find_one(&id)?.ok_or(ApiError::NotFound(id))
    })
    .await?;
    Ok(Json(Video::from_document(doc)?))
}

/// `PUT /api/videos/:id` — replaces only `title` and `description`.
pub(super) async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VideoInput>, JsonRejection>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let outcome = with_videos(&state, move |videos| {
        let outcome = videos.update_fields(&id, input.into_fields())?;
        if outcome.matched == 0 {
            return Err(ApiError::NotFound(id));
        }
        Ok(outcome)
    })
    .await?;
    Ok(Json(outcome))
}

/// `DELETE /api/videos/:id`
pub(super) async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RemoveOutcome>, ApiError> {
    let outcome = with_videos(&state, move |videos| {
        let outcome = videos.remove(&id)?;
        if outcome.removed == 0 {
            return Err(ApiError::NotFound(id));
        }
        Ok(outcome)
    })
    .await?;
    Ok(Json(outcome))
}

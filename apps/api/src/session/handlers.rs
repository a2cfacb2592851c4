use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeData, RoadmapData};
use crate::pricing::payment::PaymentReceipt;
use crate::state::AppState;
use crate::store::Toast;
use crate::wizard::{compute_progress, ProgressReport};

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeData,
    pub unlocked: Vec<String>,
    pub last_receipt: Option<PaymentReceipt>,
}

#[derive(Debug, Deserialize)]
pub struct SetStepRequest {
    pub step: u32,
}

#[derive(Debug, Deserialize)]
pub struct JobRoleRequest {
    pub job_role: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// DELETE /api/v1/sessions/:sid
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(sid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:sid/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let session = handle.lock().await;
    Ok(Json(ResumeResponse {
        resume: session.store.resume_data().clone(),
        unlocked: session.unlocked.iter().cloned().collect(),
        last_receipt: session.payment.last_receipt().cloned(),
    }))
}

/// GET /api/v1/sessions/:sid/wizard
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<ProgressReport>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let session = handle.lock().await;
    Ok(Json(compute_progress(&session.store)))
}

/// PUT /api/v1/sessions/:sid/wizard/step
///
/// Moves the wizard pointer anywhere; steps are not bounds-checked.
pub async fn handle_set_step(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(req): Json<SetStepRequest>,
) -> Result<Json<ProgressReport>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    session.store.set_current_step(req.step);
    Ok(Json(compute_progress(&session.store)))
}

/// PUT /api/v1/sessions/:sid/job-role
pub async fn handle_set_job_role(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(req): Json<JobRoleRequest>,
) -> Result<StatusCode, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    session
        .store
        .set_selected_job_role(req.job_role.trim().to_string());
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:sid/roadmap
pub async fn handle_set_roadmap(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(roadmap): Json<RoadmapData>,
) -> Result<StatusCode, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    session.store.update_roadmap(Some(roadmap));
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:sid/toasts
///
/// Returns pending notifications and clears them.
pub async fn handle_drain_toasts(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<Vec<Toast>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    Ok(Json(session.store.drain_toasts()))
}

//! Axum route handlers for the section forms.
//!
//! List-section handlers are generic over `FormItem`; `routes::section_routes` mounts one
//! copy per section.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms::{ContinueOutcome, FormItem, FormView};
use crate::models::resume::PersonalInfo;
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SaveItemResponse<T> {
    pub item_id: Uuid,
    pub form: FormView<T>,
}

#[derive(Debug, Serialize)]
pub struct DeleteItemResponse<T> {
    pub removed: bool,
    pub form: FormView<T>,
}

#[derive(Debug, Serialize)]
pub struct PersonalInfoView {
    pub buffer: PersonalInfo,
    pub saved: PersonalInfo,
}

// ────────────────────────────────────────────────────────────────────────────
// List sections
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:sid/forms/<section>
pub async fn handle_get_form<T: FormItem>(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<FormView<T>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let session = handle.lock().await;
    Ok(Json(T::form(&session.forms).view()))
}

/// PUT /api/v1/sessions/:sid/forms/<section>/buffer
pub async fn handle_set_buffer<T: FormItem>(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(draft): Json<T>,
) -> Result<Json<FormView<T>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let form = T::form_mut(&mut session.forms);
    form.set_buffer(draft);
    Ok(Json(form.view()))
}

/// POST /api/v1/sessions/:sid/forms/<section>/suggestion
pub async fn handle_apply_suggestion<T: FormItem>(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(req): Json<SuggestionRequest>,
) -> Result<Json<FormView<T>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let form = T::form_mut(&mut session.forms);
    form.apply_suggestion(&req.field, &req.value)?;
    Ok(Json(form.view()))
}

/// POST /api/v1/sessions/:sid/forms/<section>/edit/:item_id
pub async fn handle_begin_edit<T: FormItem>(
    State(state): State<AppState>,
    Path((sid, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<FormView<T>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let form = T::form_mut(&mut session.forms);
    form.begin_edit(item_id)?;
    Ok(Json(form.view()))
}

/// POST /api/v1/sessions/:sid/forms/<section>/cancel
pub async fn handle_cancel<T: FormItem>(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<FormView<T>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let form = T::form_mut(&mut session.forms);
    form.cancel();
    Ok(Json(form.view()))
}

/// POST /api/v1/sessions/:sid/forms/<section>/save
///
/// The body replaces the working buffer before saving. Validation failures leave an error
/// toast on the session and return 400.
pub async fn handle_save_item<T: FormItem>(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(draft): Json<T>,
) -> Result<Json<SaveItemResponse<T>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let Session { store, forms, .. } = &mut *session;
    let form = T::form_mut(forms);
    form.set_buffer(draft);
    let item_id = form.save_item(store)?;
    Ok(Json(SaveItemResponse {
        item_id,
        form: form.view(),
    }))
}

/// DELETE /api/v1/sessions/:sid/forms/<section>/items/:item_id
pub async fn handle_delete_item<T: FormItem>(
    State(state): State<AppState>,
    Path((sid, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DeleteItemResponse<T>>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let Session { store, forms, .. } = &mut *session;
    let form = T::form_mut(forms);
    let removed = form.delete_item(item_id, store);
    Ok(Json(DeleteItemResponse {
        removed,
        form: form.view(),
    }))
}

/// POST /api/v1/sessions/:sid/forms/<section>/continue
pub async fn handle_save_and_continue<T: FormItem>(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<ContinueOutcome>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let Session { store, forms, .. } = &mut *session;
    Ok(Json(T::form_mut(forms).save_and_continue(store)))
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:sid/personal-info
pub async fn handle_get_personal_info(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<PersonalInfoView>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let session = handle.lock().await;
    Ok(Json(PersonalInfoView {
        buffer: session.forms.personal_info.buffer().clone(),
        saved: session.store.resume_data().personal_info.clone(),
    }))
}

/// PUT /api/v1/sessions/:sid/personal-info
pub async fn handle_set_personal_info(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(draft): Json<PersonalInfo>,
) -> Result<Json<PersonalInfoView>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    session.forms.personal_info.set_buffer(draft);
    Ok(Json(PersonalInfoView {
        buffer: session.forms.personal_info.buffer().clone(),
        saved: session.store.resume_data().personal_info.clone(),
    }))
}

/// POST /api/v1/sessions/:sid/personal-info/continue
pub async fn handle_personal_info_continue(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<ContinueOutcome>, AppError> {
    let handle = state.sessions.get(sid).await?;
    let mut session = handle.lock().await;
    let Session { store, forms, .. } = &mut *session;
    let outcome = forms.personal_info.save_and_continue(store)?;
    Ok(Json(outcome))
}

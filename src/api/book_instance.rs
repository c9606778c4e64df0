//! Book instance API handlers
//!
//! Instances are addressed by UUID. Listing responses carry the overdue flag
//! computed against today's local date.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{error_response, not_found};
use crate::domain::overdue;
use crate::domain::{
    BookInstance, CreateBookInstanceInput, DomainError, LoanStatus, UpdateBookInstanceInput,
};
use crate::infrastructure::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InstanceFilter {
    pub status: Option<LoanStatus>,
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    params(("status" = Option<String>, Query, description = "One of m, o, a, r")),
    responses(
        (status = 200, description = "Instances ordered by due-back date", body = [BookInstance])
    )
)]
pub async fn list_instances(
    State(state): State<AppState>,
    Query(filter): Query<InstanceFilter>,
) -> impl IntoResponse {
    match state.instance_repo.find_all(filter.status).await {
        Ok(instances) => Json(json!({
            "total": instances.len(),
            "bookinstances": instances,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstances/overdue",
    responses(
        (status = 200, description = "Instances whose due-back date has passed", body = [BookInstance])
    )
)]
pub async fn list_overdue(State(state): State<AppState>) -> impl IntoResponse {
    match state.instance_repo.find_overdue(overdue::today()).await {
        Ok(instances) => Json(json!({
            "total": instances.len(),
            "bookinstances": instances,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstances",
    request_body = CreateBookInstanceInput,
    responses(
        (status = 201, description = "Instance created, status defaults to m", body = BookInstance),
        (status = 400, description = "Imprint missing or too long, or unknown book")
    )
)]
pub async fn create_instance(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookInstanceInput>,
) -> impl IntoResponse {
    match state.instance_repo.create(payload).await {
        Ok(instance) => (
            StatusCode::CREATED,
            Json(json!({ "bookinstance": instance })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    params(("id" = Uuid, Path, description = "Instance UUID")),
    responses(
        (status = 200, description = "Instance with its overdue flag", body = BookInstance),
        (status = 404, description = "No such instance")
    )
)]
pub async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.instance_repo.find_by_id(id).await {
        Ok(Some(instance)) => Json(json!({ "bookinstance": instance })).into_response(),
        Ok(None) => not_found("Book instance"),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    patch,
    path = "/catalog/bookinstance/{id}",
    params(("id" = Uuid, Path, description = "Instance UUID")),
    request_body = UpdateBookInstanceInput,
    responses(
        (status = 200, description = "Updated instance", body = BookInstance),
        (status = 404, description = "No such instance")
    )
)]
pub async fn update_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookInstanceInput>,
) -> impl IntoResponse {
    match state.instance_repo.update(id, payload).await {
        Ok(instance) => Json(json!({ "bookinstance": instance })).into_response(),
        Err(DomainError::NotFound) => not_found("Book instance"),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/catalog/bookinstance/{id}",
    params(("id" = Uuid, Path, description = "Instance UUID")),
    responses(
        (status = 200, description = "Instance deleted"),
        (status = 404, description = "No such instance")
    )
)]
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.instance_repo.delete(id).await {
        Ok(()) => Json(json!({ "message": "Book instance deleted" })).into_response(),
        Err(DomainError::NotFound) => not_found("Book instance"),
        Err(e) => error_response(e),
    }
}

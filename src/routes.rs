//! HTTP surface: the access gate plus create/read/update/delete semantics
//! for the course resource. Every existence decision goes through the
//! store; there is no in-memory membership cache, so POST and PUT agree on
//! what exists.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::error;

use crate::error::AppError;
use crate::models::Course;
use crate::repository;
use crate::state::AppState;
use crate::validate::{sanitize_course, validate_and_sanitize};

#[derive(Deserialize)]
struct KeyParams {
    key: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/", get(home))
        .route("/api/v1/courses", get(list_courses))
        .route(
            "/api/v1/courses/{id}",
            get(get_course)
                .post(create_course)
                .put(upsert_course)
                .delete(delete_course),
        )
        .with_state(state)
}

/// The access gate. Runs before any field of the request is looked at;
/// missing and mismatched keys get distinct bodies but the same status.
fn require_key(state: &AppState, params: &KeyParams) -> Result<(), AppError> {
    match params.key.as_deref() {
        None => Err(AppError::KeyMissing),
        Some(key) if key != state.api_key => Err(AppError::KeyInvalid),
        Some(_) => Ok(()),
    }
}

/// Path identifiers must be integers before any store access happens.
fn parse_code(id: &str) -> Result<i64, AppError> {
    id.parse().map_err(|_| {
        error!("received non-integer course id in path: {id:?}");
        AppError::InvalidId
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Parse and validate a POST/PUT body. Wrong content type, malformed JSON
/// and pattern failures all collapse to the same 422; the failing field is
/// logged before the detail is discarded.
fn parse_submission(headers: &HeaderMap, body: &str) -> Result<Course, AppError> {
    if !is_json(headers) {
        error!("course submission without application/json content type");
        return Err(AppError::Unprocessable);
    }

    let mut course: Course = serde_json::from_str(body).map_err(|e| {
        error!("malformed course submission body: {e}");
        AppError::Unprocessable
    })?;

    validate_and_sanitize(&mut course).map_err(|field| {
        error!("incorrect input format for {field} detected during validation");
        AppError::Unprocessable
    })?;

    Ok(course)
}

async fn home() -> &'static str {
    "Welcome to the REST API!"
}

async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<KeyParams>,
) -> Result<Json<BTreeMap<i64, Course>>, AppError> {
    require_key(&state, &params)?;

    let mut courses = BTreeMap::new();
    for mut course in repository::fetch_all(&state.db).await? {
        sanitize_course(&mut course);
        courses.insert(course.code, course);
    }

    Ok(Json(courses))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<KeyParams>,
) -> Result<Response, AppError> {
    require_key(&state, &params)?;
    let code = parse_code(&id)?;

    let mut course = repository::fetch_one(&state.db, code)
        .await?
        .ok_or(AppError::NotFound)?;
    sanitize_course(&mut course);

    Ok(Json(course).into_response())
}

async fn create_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<KeyParams>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    require_key(&state, &params)?;
    let code = parse_code(&id)?;
    let course = parse_submission(&headers, &body)?;

    if repository::exists(&state.db, code).await? {
        error!("duplicate course id on create: {code}");
        return Err(AppError::Conflict);
    }
    if !course.is_complete() {
        error!("incomplete course submission on create: {code}");
        return Err(AppError::Unprocessable);
    }

    repository::insert(&state.db, &course).await?;
    Ok((StatusCode::CREATED, format!("201 - Course added: {id}")).into_response())
}

async fn upsert_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<KeyParams>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    require_key(&state, &params)?;
    parse_code(&id)?;
    let mut course = parse_submission(&headers, &body)?;

    match repository::fetch_one(&state.db, course.code).await? {
        None => {
            if !course.is_complete() {
                error!("incomplete course submission on create: {}", course.code);
                return Err(AppError::Unprocessable);
            }
            repository::insert(&state.db, &course).await?;
            Ok((StatusCode::CREATED, format!("201 - Course added: {id}")).into_response())
        }
        Some(prior) => {
            // Empty incoming fields mean "keep previous value".
            course.merge_from(&prior);
            repository::update(&state.db, &course).await?;
            Ok((StatusCode::ACCEPTED, format!("202 - Course updated: {id}")).into_response())
        }
    }
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<KeyParams>,
) -> Result<Response, AppError> {
    require_key(&state, &params)?;
    let code = parse_code(&id)?;

    if repository::delete(&state.db, code).await? {
        Ok((StatusCode::ACCEPTED, format!("202 - Course deleted: {id}")).into_response())
    } else {
        Err(AppError::NotFound)
    }
}

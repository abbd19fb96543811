//! HTTP handlers for `/api/authors/{authorId}/courses`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use courselib_db::LibraryStore;
use courselib_http::error::AppError;
use courselib_http::extract::{JsonBody, PathParams};
use uuid::Uuid;

use super::models::{CourseDto, CourseForCreation, CourseForUpdate};
use super::patch::PatchDocument;
use super::reconcile::{CoursePayload, ReconcileOutcome};
use super::service;
use crate::modules::links;

type Store = State<Arc<LibraryStore>>;

pub async fn list_courses(
    State(store): Store,
    PathParams(author_id): PathParams<Uuid>,
) -> Result<Json<Vec<CourseDto>>, AppError> {
    let courses = service::list_courses(&store, author_id)?;
    Ok(Json(courses.iter().map(CourseDto::from).collect()))
}

pub async fn get_course(
    State(store): Store,
    PathParams((author_id, course_id)): PathParams<(Uuid, Uuid)>,
) -> Result<Json<CourseDto>, AppError> {
    let course = service::get_course(&store, author_id, course_id)?;
    Ok(Json(CourseDto::from(&course)))
}

pub async fn create_course(
    State(store): Store,
    PathParams(author_id): PathParams<Uuid>,
    JsonBody(input): JsonBody<CourseForCreation>,
) -> Result<Response, AppError> {
    let course = service::create_course(&store, author_id, &input)?;
    Ok(created(author_id, CourseDto::from(&course)))
}

pub async fn update_course(
    State(store): Store,
    PathParams((author_id, course_id)): PathParams<(Uuid, Uuid)>,
    JsonBody(input): JsonBody<CourseForUpdate>,
) -> Result<Response, AppError> {
    let outcome = service::upsert_course(
        &store,
        author_id,
        course_id,
        CoursePayload::Replace(&input),
    )?;
    Ok(upserted(author_id, outcome))
}

pub async fn patch_course(
    State(store): Store,
    PathParams((author_id, course_id)): PathParams<(Uuid, Uuid)>,
    JsonBody(document): JsonBody<PatchDocument>,
) -> Result<Response, AppError> {
    let outcome = service::upsert_course(
        &store,
        author_id,
        course_id,
        CoursePayload::Patch(&document),
    )?;
    Ok(upserted(author_id, outcome))
}

pub async fn delete_course(
    State(store): Store,
    PathParams((author_id, course_id)): PathParams<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    service::delete_course(&store, author_id, course_id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn created(author_id: Uuid, course: CourseDto) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, links::course(author_id, course.id))],
        Json(course),
    )
        .into_response()
}

fn upserted(author_id: Uuid, outcome: ReconcileOutcome) -> Response {
    match outcome {
        ReconcileOutcome::Created(course) => created(author_id, CourseDto::from(&course)),
        ReconcileOutcome::Updated(_) => StatusCode::NO_CONTENT.into_response(),
    }
}

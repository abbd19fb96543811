//! HTTP handlers for `/api/authorcollections`.

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

use super::service;
use crate::modules::authors::models::{AuthorDto, AuthorForCreation};
use crate::modules::error::LibraryError;
use crate::modules::links;
use crate::utils::ids;

type Store = State<Arc<LibraryStore>>;

pub async fn get_author_collection(
    State(store): Store,
    PathParams(segment): PathParams<String>,
) -> Result<Json<Vec<AuthorDto>>, AppError> {
    let author_ids = ids::from_route_segment(&segment)
        .map_err(|err| LibraryError::BadRequest(err.to_string()))?
        .ok_or_else(|| LibraryError::BadRequest("no author ids supplied".into()))?;

    let authors = service::fetch_authors(&store, &author_ids).into_result()?;
    Ok(Json(authors.iter().map(AuthorDto::from).collect()))
}

pub async fn create_author_collection(
    State(store): Store,
    JsonBody(inputs): JsonBody<Vec<AuthorForCreation>>,
) -> Result<Response, AppError> {
    if inputs.is_empty() {
        return Err(LibraryError::BadRequest("author collection is empty".into()).into());
    }

    let authors = service::create_authors(&store, &inputs)?;
    let author_ids = authors.iter().map(|a| a.id).collect::<Vec<_>>();
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, links::author_collection(&author_ids))],
        Json(authors.iter().map(AuthorDto::from).collect::<Vec<_>>()),
    )
        .into_response())
}

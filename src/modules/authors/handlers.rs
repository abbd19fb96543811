//! HTTP handlers for `/api/authors`.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use courselib_db::{AuthorResourceParameters, LibraryStore, Page, QueryParameters};
use courselib_http::error::AppError;
use courselib_http::extract::{JsonBody, PathParams, QueryParams};
use uuid::Uuid;

use super::models::{AuthorDto, AuthorForCreation, PaginationMetadata};
use super::service;
use crate::modules::links;

pub const PAGINATION_HEADER: HeaderName = HeaderName::from_static("x-pagination");
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

type Store = State<Arc<LibraryStore>>;

pub async fn list_authors(
    State(store): Store,
    QueryParams(raw): QueryParams<AuthorResourceParameters>,
) -> Result<(HeaderMap, Json<Vec<AuthorDto>>), AppError> {
    let params = QueryParameters::from(&raw);
    let page = service::list_authors(&store, &params);

    let metadata = pagination_metadata(&params, &page);

    let encoded = serde_json::to_string(&metadata).context("failed to encode pagination")?;
    let mut headers = HeaderMap::new();
    headers.insert(
        PAGINATION_HEADER,
        HeaderValue::from_str(&encoded).context("pagination metadata is not a valid header")?,
    );

    let page = page.map(|author| AuthorDto::from(&author));
    Ok((headers, Json(page.items)))
}

/// Paging metadata with navigation links. A page past the end links back to the last page.
fn pagination_metadata<T>(params: &QueryParameters, page: &Page<T>) -> PaginationMetadata {
    let previous = page.has_previous().then(|| {
        let target = (page.page_number - 1).min(page.total_pages().max(1));
        links::authors_page(params, target)
    });
    let next = page
        .has_next()
        .then(|| links::authors_page(params, page.page_number + 1));
    PaginationMetadata::new(page, previous, next)
}

pub async fn get_author(
    State(store): Store,
    PathParams(author_id): PathParams<Uuid>,
) -> Result<Json<AuthorDto>, AppError> {
    let author = service::get_author(&store, author_id)?;
    Ok(Json(AuthorDto::from(&author)))
}

pub async fn create_author(
    State(store): Store,
    JsonBody(input): JsonBody<AuthorForCreation>,
) -> Result<Response, AppError> {
    let author = service::create_author(&store, &input)?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, links::author(author.id))],
        Json(AuthorDto::from(&author)),
    )
        .into_response())
}

pub async fn delete_author(
    State(store): Store,
    PathParams(author_id): PathParams<Uuid>,
) -> Result<StatusCode, AppError> {
    service::delete_author(&store, author_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total_matched: usize, page_number: usize) -> (QueryParameters, Page<()>) {
        let params = QueryParameters::new(None, None, Some(page_number as i64), Some(2));
        let page = Page {
            items: Vec::new(),
            total_matched,
            page_number: params.page_number(),
            page_size: params.page_size(),
        };
        (params, page)
    }

    #[test]
    fn middle_page_links_both_ways() {
        let (params, page) = page(6, 2);
        let metadata = pagination_metadata(&params, &page);
        assert_eq!(
            metadata.previous_page_link.as_deref(),
            Some("/api/authors?pageNumber=1&pageSize=2")
        );
        assert_eq!(
            metadata.next_page_link.as_deref(),
            Some("/api/authors?pageNumber=3&pageSize=2")
        );
    }

    #[test]
    fn page_past_the_end_links_back_to_last_page() {
        let (params, page) = page(3, 7);
        let metadata = pagination_metadata(&params, &page);
        assert_eq!(metadata.total_pages, 2);
        assert_eq!(
            metadata.previous_page_link.as_deref(),
            Some("/api/authors?pageNumber=2&pageSize=2")
        );
        assert_eq!(metadata.next_page_link, None);
    }

    #[test]
    fn empty_result_past_the_end_links_to_first_page() {
        let (params, page) = page(0, 3);
        let metadata = pagination_metadata(&params, &page);
        assert_eq!(metadata.total_pages, 0);
        assert_eq!(
            metadata.previous_page_link.as_deref(),
            Some("/api/authors?pageNumber=1&pageSize=2")
        );
    }
}

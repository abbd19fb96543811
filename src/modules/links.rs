//! Resource locations used in `Location` and `X-Pagination` headers.

use courselib_db::QueryParameters;
use url::form_urlencoded;
use uuid::Uuid;

use crate::utils::ids;

pub const AUTHORS_PATH: &str = "/api/authors";
pub const AUTHOR_COLLECTIONS_PATH: &str = "/api/authorcollections";

pub fn author(author_id: Uuid) -> String {
    format!("{AUTHORS_PATH}/{author_id}")
}

pub fn course(author_id: Uuid, course_id: Uuid) -> String {
    format!("{AUTHORS_PATH}/{author_id}/courses/{course_id}")
}

pub fn author_collection(author_ids: &[Uuid]) -> String {
    format!(
        "{AUTHOR_COLLECTIONS_PATH}/{}",
        ids::to_route_segment(author_ids)
    )
}

/// Link to `page_number` of the author listing described by `params`.
pub fn authors_page(params: &QueryParameters, page_number: usize) -> String {
    let params = params.with_page(page_number);
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(category) = params.category() {
        query.append_pair("mainCategory", category);
    }
    if let Some(search) = params.search_query() {
        query.append_pair("searchQuery", search);
    }
    query.append_pair("pageNumber", &params.page_number().to_string());
    query.append_pair("pageSize", &params.page_size().to_string());
    format!("{AUTHORS_PATH}?{}", query.finish())
}

//! Author use-cases over the shared store.

use courselib_db::{Author, LibraryStore, Page, QueryParameters, UnitOfWork};
use uuid::Uuid;

use super::models::AuthorForCreation;
use crate::modules::courses::validation::{validate_course, ValidationErrors};
use crate::modules::error::LibraryError;

pub fn list_authors(store: &LibraryStore, params: &QueryParameters) -> Page<Author> {
    let page = store.read().get_authors(params);
    tracing::debug!(
        category = params.category(),
        search = params.search_query(),
        page = page.page_number,
        total_matched = page.total_matched,
        "authors queried"
    );
    page
}

pub fn get_author(store: &LibraryStore, author_id: Uuid) -> Result<Author, LibraryError> {
    store
        .read()
        .get_author(author_id)
        .cloned()
        .ok_or_else(|| LibraryError::author_not_found(author_id))
}

pub fn create_author(
    store: &LibraryStore,
    input: &AuthorForCreation,
) -> Result<Author, LibraryError> {
    validate_author(input, "").into_result()?;

    let mut uow = store.begin();
    let author = stage_author(&mut uow, input)?;
    uow.save();

    tracing::info!(author_id = %author.id, courses = input.courses.len(), "author created");
    Ok(author)
}

pub fn delete_author(store: &LibraryStore, author_id: Uuid) -> Result<(), LibraryError> {
    let mut uow = store.begin();
    if !uow.author_exists(author_id) {
        return Err(LibraryError::author_not_found(author_id));
    }
    uow.delete_author(author_id)?;
    uow.save();

    tracing::info!(%author_id, "author deleted");
    Ok(())
}

/// Validate the courses embedded in a creation body; field names are prefixed with `prefix`.
pub(crate) fn validate_author(input: &AuthorForCreation, prefix: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for (index, course) in input.courses.iter().enumerate() {
        if let Err(course_errors) = validate_course(course) {
            let path = format!("{prefix}courses[{index}]");
            errors.extend(ValidationErrors::from(
                course_errors
                    .violations()
                    .iter()
                    .cloned()
                    .map(|v| v.nested(&path))
                    .collect::<Vec<_>>(),
            ));
        }
    }
    errors
}

/// Stage a validated author and its courses on `uow`.
pub(crate) fn stage_author(
    uow: &mut UnitOfWork<'_>,
    input: &AuthorForCreation,
) -> Result<Author, LibraryError> {
    let (author, courses) = input.to_entities();
    uow.add_author(author.clone())?;
    for course in courses {
        uow.add_course(author.id, course)?;
    }
    Ok(author)
}

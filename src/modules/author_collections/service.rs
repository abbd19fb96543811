//! Batch reads and writes over several authors at once.
//!
//! # Invariants
//! - A batch fetch returns found authors in request order and reports every missing id.
//! - Repeated ids are collapsed, so each author appears at most once.
//! - A batch create is all-or-nothing: one invalid author rejects the whole batch.

use std::collections::HashSet;

use courselib_db::{Author, LibraryStore};
use uuid::Uuid;

use crate::modules::authors::models::AuthorForCreation;
use crate::modules::authors::service::{stage_author, validate_author};
use crate::modules::courses::validation::ValidationErrors;
use crate::modules::error::LibraryError;

/// Result of looking up a list of author ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFetch {
    pub authors: Vec<Author>,
    pub missing: Vec<Uuid>,
}

impl BatchFetch {
    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }

    pub fn into_result(self) -> Result<Vec<Author>, LibraryError> {
        if self.is_partial() {
            return Err(LibraryError::PartialNotFound {
                missing: self.missing,
            });
        }
        Ok(self.authors)
    }
}

/// Look up `author_ids`; a repeated id is only resolved once, at its first position.
pub fn fetch_authors(store: &LibraryStore, author_ids: &[Uuid]) -> BatchFetch {
    let mut seen = HashSet::new();
    let author_ids = author_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect::<Vec<_>>();

    let state = store.read();
    let authors = state.get_authors_by_ids(&author_ids);
    let missing = author_ids
        .iter()
        .copied()
        .filter(|id| !state.author_exists(*id))
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        tracing::debug!(
            requested = author_ids.len(),
            missing = missing.len(),
            "author batch partially resolved"
        );
    }
    BatchFetch { authors, missing }
}

pub fn create_authors(
    store: &LibraryStore,
    inputs: &[AuthorForCreation],
) -> Result<Vec<Author>, LibraryError> {
    let mut errors = ValidationErrors::default();
    for (index, input) in inputs.iter().enumerate() {
        errors.extend(validate_author(input, &format!("[{index}].")));
    }
    errors.into_result()?;

    let mut uow = store.begin();
    let authors = inputs
        .iter()
        .map(|input| stage_author(&mut uow, input))
        .collect::<Result<Vec<_>, _>>()?;
    uow.save();

    tracing::info!(authors = authors.len(), "author collection created");
    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::courses::models::CourseForCreation;
    use time::macros::date;

    fn body(first_name: &str, courses: Vec<CourseForCreation>) -> AuthorForCreation {
        AuthorForCreation {
            first_name: first_name.into(),
            last_name: "Teach".into(),
            date_of_birth: date!(1680 - 01 - 01),
            date_of_death: None,
            main_category: "Maps".into(),
            courses,
        }
    }

    #[test]
    fn partial_fetch_keeps_found_authors_in_request_order() {
        let store = LibraryStore::new();
        let created = create_authors(&store, &[body("Anne", vec![]), body("Mary", vec![])]).unwrap();
        let unknown = Uuid::new_v4();

        let fetch = fetch_authors(&store, &[created[1].id, created[0].id, unknown]);
        assert!(fetch.is_partial());
        assert_eq!(fetch.authors, vec![created[1].clone(), created[0].clone()]);
        assert_eq!(fetch.missing, vec![unknown]);

        match fetch.into_result() {
            Err(LibraryError::PartialNotFound { missing }) => assert_eq!(missing, vec![unknown]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn repeated_ids_resolve_once() {
        let store = LibraryStore::new();
        let created = create_authors(&store, &[body("Anne", vec![]), body("Mary", vec![])]).unwrap();
        let unknown = Uuid::new_v4();

        let fetch = fetch_authors(
            &store,
            &[created[0].id, created[1].id, created[0].id, unknown, unknown],
        );
        assert_eq!(fetch.authors, created);
        assert_eq!(fetch.missing, vec![unknown]);
    }

    #[test]
    fn complete_fetch_yields_authors() {
        let store = LibraryStore::new();
        let created = create_authors(&store, &[body("Anne", vec![])]).unwrap();
        let authors = fetch_authors(&store, &[created[0].id]).into_result().unwrap();
        assert_eq!(authors, created);
    }

    #[test]
    fn one_invalid_author_rejects_the_batch() {
        let store = LibraryStore::new();
        let err = create_authors(
            &store,
            &[
                body("Anne", vec![]),
                body("Mary", vec![CourseForCreation::new("Same", Some("Same"))]),
            ],
        )
        .unwrap_err();

        match err {
            LibraryError::ValidationFailed(errors) => {
                assert_eq!(errors.violations()[0].field, "[1].courses[0].course");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.read().author_count(), 0);
    }
}

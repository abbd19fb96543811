//! Course use-cases over the shared store.
//!
//! Every write opens one unit of work: parent check, lookup, validation and mutation all
//! happen under the same exclusive guard, and nothing is saved unless every step succeeds.

use courselib_db::{Course, IdAssignment, LibraryStore};
use uuid::Uuid;

use super::models::CourseForCreation;
use super::reconcile::{reconcile, CoursePayload, ReconcileOutcome};
use super::validation::validate_course;
use crate::modules::error::LibraryError;

pub fn list_courses(store: &LibraryStore, author_id: Uuid) -> Result<Vec<Course>, LibraryError> {
    let state = store.read();
    if !state.author_exists(author_id) {
        return Err(LibraryError::NotFoundParent(author_id));
    }
    Ok(state.get_courses(author_id))
}

pub fn get_course(
    store: &LibraryStore,
    author_id: Uuid,
    course_id: Uuid,
) -> Result<Course, LibraryError> {
    let state = store.read();
    if !state.author_exists(author_id) {
        return Err(LibraryError::NotFoundParent(author_id));
    }
    state
        .get_course(author_id, course_id)
        .cloned()
        .ok_or_else(|| LibraryError::course_not_found(course_id))
}

/// Standard creation: the server generates the identifier.
pub fn create_course(
    store: &LibraryStore,
    author_id: Uuid,
    input: &CourseForCreation,
) -> Result<Course, LibraryError> {
    let mut uow = store.begin();
    if !uow.author_exists(author_id) {
        return Err(LibraryError::NotFoundParent(author_id));
    }
    validate_course(input)?;

    let course = input.to_course(author_id, IdAssignment::Generated);
    uow.add_course(author_id, course.clone())?;
    uow.save();

    tracing::info!(%author_id, course_id = %course.id, "course created");
    Ok(course)
}

/// PUT/PATCH: create the course under `course_id` if absent, otherwise update it.
pub fn upsert_course(
    store: &LibraryStore,
    author_id: Uuid,
    course_id: Uuid,
    payload: CoursePayload<'_>,
) -> Result<ReconcileOutcome, LibraryError> {
    let mut uow = store.begin();
    if !uow.author_exists(author_id) {
        return Err(LibraryError::NotFoundParent(author_id));
    }

    let existing = uow.get_course(author_id, course_id).cloned();
    let outcome = reconcile(existing.as_ref(), author_id, course_id, payload).inspect_err(
        |errors| tracing::info!(%author_id, %course_id, %errors, "course upsert rejected"),
    )?;

    match &outcome {
        ReconcileOutcome::Created(course) => uow.add_course(author_id, course.clone())?,
        ReconcileOutcome::Updated(course) => uow.update_course(course.clone())?,
    }
    uow.save();

    tracing::info!(%author_id, %course_id, outcome = outcome.label(), "course upserted");
    Ok(outcome)
}

pub fn delete_course(
    store: &LibraryStore,
    author_id: Uuid,
    course_id: Uuid,
) -> Result<(), LibraryError> {
    let mut uow = store.begin();
    if !uow.author_exists(author_id) {
        return Err(LibraryError::NotFoundParent(author_id));
    }
    let course = uow
        .get_course(author_id, course_id)
        .cloned()
        .ok_or_else(|| LibraryError::course_not_found(course_id))?;

    uow.delete_course(&course)?;
    uow.save();

    tracing::info!(%author_id, %course_id, "course deleted");
    Ok(())
}

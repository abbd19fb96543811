//! In-memory library store.
//!
//! Readers share a consistent snapshot through a read guard. Writers go through a
//! [`UnitOfWork`], which owns the exclusive guard for its whole lifetime, stages
//! mutations on a working copy and publishes them only on [`UnitOfWork::save`].

use std::ops::Deref;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{Author, Course};
use crate::query::{query_authors, Page, QueryParameters};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a resource with id {0} already exists")]
    DuplicateId(Uuid),
    #[error("author {0} does not exist")]
    AuthorNotFound(Uuid),
    #[error("course {0} does not exist")]
    CourseNotFound(Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Committed contents of the store, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryState {
    authors: Vec<Author>,
    courses: Vec<Course>,
}

impl LibraryState {
    pub fn get_author(&self, author_id: Uuid) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == author_id)
    }

    pub fn get_authors(&self, params: &QueryParameters) -> Page<Author> {
        query_authors(&self.authors, params)
    }

    /// Authors for `author_ids` in request order. Ids without an author are skipped and a
    /// repeated id yields its author again; callers wanting a set dedupe first.
    pub fn get_authors_by_ids(&self, author_ids: &[Uuid]) -> Vec<Author> {
        author_ids
            .iter()
            .filter_map(|id| self.get_author(*id))
            .cloned()
            .collect()
    }

    pub fn author_exists(&self, author_id: Uuid) -> bool {
        self.get_author(author_id).is_some()
    }

    pub fn get_course(&self, author_id: Uuid, course_id: Uuid) -> Option<&Course> {
        self.courses
            .iter()
            .find(|c| c.author_id == author_id && c.id == course_id)
    }

    pub fn get_courses(&self, author_id: Uuid) -> Vec<Course> {
        self.courses
            .iter()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}

/// Thread-safe handle to the library contents.
#[derive(Debug, Default)]
pub struct LibraryStore {
    state: RwLock<LibraryState>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared snapshot; writers wait until every reader has dropped its guard.
    pub fn read(&self) -> RwLockReadGuard<'_, LibraryState> {
        self.state.read()
    }

    /// Begin a serialized write. Nothing is visible to readers until `save`.
    pub fn begin(&self) -> UnitOfWork<'_> {
        let guard = self.state.write();
        let working = guard.clone();
        UnitOfWork {
            guard,
            working,
            pending: 0,
        }
    }
}

/// Exclusive, all-or-nothing write session over the store.
pub struct UnitOfWork<'a> {
    guard: RwLockWriteGuard<'a, LibraryState>,
    working: LibraryState,
    pending: usize,
}

impl UnitOfWork<'_> {
    pub fn add_author(&mut self, author: Author) -> StoreResult<()> {
        if self.working.author_exists(author.id) {
            return Err(StoreError::DuplicateId(author.id));
        }
        self.working.authors.push(author);
        self.pending += 1;
        Ok(())
    }

    /// Remove an author together with every course it owns.
    pub fn delete_author(&mut self, author_id: Uuid) -> StoreResult<()> {
        let before = self.working.authors.len();
        self.working.authors.retain(|a| a.id != author_id);
        if self.working.authors.len() == before {
            return Err(StoreError::AuthorNotFound(author_id));
        }
        self.working.courses.retain(|c| c.author_id != author_id);
        self.pending += 1;
        Ok(())
    }

    /// Attach `course` to `author_id`; the course keeps whatever id it was given.
    pub fn add_course(&mut self, author_id: Uuid, mut course: Course) -> StoreResult<()> {
        if !self.working.author_exists(author_id) {
            return Err(StoreError::AuthorNotFound(author_id));
        }
        if self.working.courses.iter().any(|c| c.id == course.id) {
            return Err(StoreError::DuplicateId(course.id));
        }
        course.author_id = author_id;
        self.working.courses.push(course);
        self.pending += 1;
        Ok(())
    }

    pub fn update_course(&mut self, course: Course) -> StoreResult<()> {
        let slot = self
            .working
            .courses
            .iter_mut()
            .find(|c| c.id == course.id && c.author_id == course.author_id)
            .ok_or(StoreError::CourseNotFound(course.id))?;
        *slot = course;
        self.pending += 1;
        Ok(())
    }

    pub fn delete_course(&mut self, course: &Course) -> StoreResult<()> {
        let before = self.working.courses.len();
        self.working
            .courses
            .retain(|c| !(c.id == course.id && c.author_id == course.author_id));
        if self.working.courses.len() == before {
            return Err(StoreError::CourseNotFound(course.id));
        }
        self.pending += 1;
        Ok(())
    }

    /// Publish every staged mutation atomically.
    pub fn save(mut self) -> usize {
        let committed = self.pending;
        *self.guard = std::mem::take(&mut self.working);
        tracing::debug!(mutations = committed, "unit of work committed");
        committed
    }
}

impl Deref for UnitOfWork<'_> {
    type Target = LibraryState;

    fn deref(&self) -> &Self::Target {
        &self.working
    }
}

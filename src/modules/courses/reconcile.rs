//! Create-or-update decision for PUT and PATCH on a client-addressed course.
//!
//! # Invariants
//! - Validation always runs on the merged representation, never on the raw payload.
//! - A created course carries exactly the identifier the client addressed.
//! - Reconciliation is pure; committing the outcome is the caller's job.

use courselib_db::{Course, IdAssignment};
use uuid::Uuid;

use super::models::CourseForUpdate;
use super::patch::PatchDocument;
use super::validation::{validate_course, ValidationErrors, Violation};

/// What the client sent.
#[derive(Debug, Clone, Copy)]
pub enum CoursePayload<'a> {
    /// Full replacement; absent fields fall back to their defaults.
    Replace(&'a CourseForUpdate),
    /// Sparse operations against the current (or a blank) representation.
    Patch(&'a PatchDocument),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created(Course),
    Updated(Course),
}

impl ReconcileOutcome {
    pub fn course(&self) -> &Course {
        match self {
            ReconcileOutcome::Created(course) | ReconcileOutcome::Updated(course) => course,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ReconcileOutcome::Created(_))
    }

    pub fn label(&self) -> &'static str {
        if self.is_created() {
            "created"
        } else {
            "updated"
        }
    }
}

/// Decide create-vs-update for `incoming_id`, merge the payload and validate the result.
///
/// `existing` must be the course stored under `(author_id, incoming_id)`, if any.
pub fn reconcile(
    existing: Option<&Course>,
    author_id: Uuid,
    incoming_id: Uuid,
    payload: CoursePayload<'_>,
) -> Result<ReconcileOutcome, ValidationErrors> {
    let representation = match payload {
        CoursePayload::Replace(replacement) => replacement.clone(),
        CoursePayload::Patch(document) => {
            let mut target = existing.map(CourseForUpdate::from).unwrap_or_default();
            document
                .apply_to(&mut target)
                .map_err(|err| ValidationErrors::from(vec![Violation::from(err)]))?;
            target
        }
    };

    validate_course(&representation)?;

    Ok(match existing {
        None => ReconcileOutcome::Created(
            representation.to_course(author_id, IdAssignment::ClientSupplied(incoming_id)),
        ),
        Some(current) => {
            let mut updated = current.clone();
            representation.apply_to(&mut updated);
            ReconcileOutcome::Updated(updated)
        }
    })
}

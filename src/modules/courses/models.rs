//! Course transfer representations and the explicit field copies between them and [`Course`].

use courselib_db::{Course, IdAssignment};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Course as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            author_id: course.author_id,
        }
    }
}

/// Writable course fields shared by creation, replacement and patching.
///
/// Absent fields deserialize to `None`; validation decides whether that is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseForManipulation {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of `POST .../courses`.
pub type CourseForCreation = CourseForManipulation;
/// Body of `PUT .../courses/{id}` and the target of PATCH documents.
pub type CourseForUpdate = CourseForManipulation;

impl CourseForManipulation {
    pub fn new(title: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            title: Some(title.into()),
            description: description.map(str::to_string),
        }
    }

    /// Materialize a new course. Expects an already validated representation.
    pub fn to_course(&self, author_id: Uuid, id: IdAssignment) -> Course {
        Course {
            id: id.resolve(),
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            author_id,
        }
    }

    /// Copy every writable field onto `course`; identity and ownership are untouched.
    pub fn apply_to(&self, course: &mut Course) {
        course.title = self.title.clone().unwrap_or_default();
        course.description = self.description.clone();
    }
}

impl From<&Course> for CourseForUpdate {
    fn from(course: &Course) -> Self {
        Self {
            title: Some(course.title.clone()),
            description: course.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "Overthrowing Mutiny".into(),
            description: Some("Tips to avoid pirate mutiny".into()),
            author_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn projection_and_merge_back_are_lossless() {
        let original = course();
        let mut merged = original.clone();
        CourseForUpdate::from(&original).apply_to(&mut merged);
        assert_eq!(merged, original);
    }

    #[test]
    fn merge_keeps_identity() {
        let original = course();
        let mut merged = original.clone();
        CourseForUpdate::new("Renamed", None).apply_to(&mut merged);
        assert_eq!(merged.id, original.id);
        assert_eq!(merged.author_id, original.author_id);
        assert_eq!(merged.title, "Renamed");
        assert_eq!(merged.description, None);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let parsed: CourseForUpdate =
            serde_json::from_value(serde_json::json!({ "title": "Only a title", "id": "ignored" }))
                .unwrap();
        assert_eq!(parsed, CourseForUpdate::new("Only a title", None));
    }

    #[test]
    fn client_supplied_id_is_forced() {
        let id = Uuid::new_v4();
        let author_id = Uuid::new_v4();
        let created =
            CourseForCreation::new("Knots", None).to_course(author_id, IdAssignment::ClientSupplied(id));
        assert_eq!(created.id, id);
        assert_eq!(created.author_id, author_id);
    }
}

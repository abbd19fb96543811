//! RFC 6902 JSON Patch documents applied to [`CourseForUpdate`].
//!
//! Only the writable course members are addressable. A document applies completely or
//! not at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::models::CourseForUpdate;
use super::validation::Violation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("the target location '{path}' does not exist on a course")]
    UnknownPath { path: String },
    #[error("the value at '{path}' must be a string or null")]
    InvalidValue { path: String },
    #[error("the current value at '{path}' does not match the tested value")]
    TestFailed { path: String },
}

impl PatchError {
    pub fn path(&self) -> &str {
        match self {
            PatchError::UnknownPath { path }
            | PatchError::InvalidValue { path }
            | PatchError::TestFailed { path } => path,
        }
    }
}

impl From<PatchError> for Violation {
    fn from(err: PatchError) -> Self {
        let field = err.path().trim_start_matches('/').to_string();
        Violation::new(field, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Copy { from: String, path: String },
    Move { from: String, path: String },
    Test { path: String, value: Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CourseMember {
    Title,
    Description,
}

impl CourseMember {
    fn parse(pointer: &str) -> Result<Self, PatchError> {
        let unknown = || PatchError::UnknownPath {
            path: pointer.to_string(),
        };
        let token = pointer.strip_prefix('/').ok_or_else(unknown)?;
        if token.contains('/') {
            return Err(unknown());
        }
        let token = token.replace("~1", "/").replace("~0", "~");
        if token.eq_ignore_ascii_case("title") {
            Ok(CourseMember::Title)
        } else if token.eq_ignore_ascii_case("description") {
            Ok(CourseMember::Description)
        } else {
            Err(unknown())
        }
    }

    fn slot(self, target: &mut CourseForUpdate) -> &mut Option<String> {
        match self {
            CourseMember::Title => &mut target.title,
            CourseMember::Description => &mut target.description,
        }
    }
}

fn string_value(path: &str, value: &Value) -> Result<Option<String>, PatchError> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        _ => Err(PatchError::InvalidValue {
            path: path.to_string(),
        }),
    }
}

impl PatchOperation {
    fn apply(&self, target: &mut CourseForUpdate) -> Result<(), PatchError> {
        match self {
            // Object members already exist, so add behaves as replace.
            PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
                let member = CourseMember::parse(path)?;
                *member.slot(target) = string_value(path, value)?;
            }
            PatchOperation::Remove { path } => {
                *CourseMember::parse(path)?.slot(target) = None;
            }
            PatchOperation::Copy { from, path } => {
                let value = CourseMember::parse(from)?.slot(target).clone();
                *CourseMember::parse(path)?.slot(target) = value;
            }
            PatchOperation::Move { from, path } => {
                let source = CourseMember::parse(from)?;
                let destination = CourseMember::parse(path)?;
                let value = source.slot(target).take();
                *destination.slot(target) = value;
            }
            PatchOperation::Test { path, value } => {
                let member = CourseMember::parse(path)?;
                let expected = string_value(path, value)?;
                if *member.slot(target) != expected {
                    return Err(PatchError::TestFailed { path: path.clone() });
                }
            }
        }
        Ok(())
    }
}

/// Ordered list of patch operations as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    /// Apply every operation in order; on error `target` is left as it was.
    pub fn apply_to(&self, target: &mut CourseForUpdate) -> Result<(), PatchError> {
        let mut working = target.clone();
        for operation in &self.0 {
            operation.apply(&mut working)?;
        }
        *target = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(ops: Value) -> PatchDocument {
        serde_json::from_value(ops).unwrap()
    }

    #[test]
    fn replace_and_remove() {
        let mut course = CourseForUpdate::new("Old", Some("Description"));
        document(json!([
            { "op": "replace", "path": "/title", "value": "New" },
            { "op": "remove", "path": "/description" }
        ]))
        .apply_to(&mut course)
        .unwrap();
        assert_eq!(course, CourseForUpdate::new("New", None));
    }

    #[test]
    fn member_names_ignore_case() {
        let mut course = CourseForUpdate::default();
        document(json!([{ "op": "add", "path": "/Title", "value": "Patched" }]))
            .apply_to(&mut course)
            .unwrap();
        assert_eq!(course.title.as_deref(), Some("Patched"));
    }

    #[test]
    fn copy_and_move_between_members() {
        let mut course = CourseForUpdate::new("Same", None);
        document(json!([{ "op": "copy", "from": "/title", "path": "/description" }]))
            .apply_to(&mut course)
            .unwrap();
        assert_eq!(course, CourseForUpdate::new("Same", Some("Same")));

        let mut course = CourseForUpdate::new("Moved", None);
        document(json!([{ "op": "move", "from": "/title", "path": "/description" }]))
            .apply_to(&mut course)
            .unwrap();
        assert_eq!(course.title, None);
        assert_eq!(course.description.as_deref(), Some("Moved"));
    }

    #[test]
    fn failed_operation_leaves_target_untouched() {
        let original = CourseForUpdate::new("Keep", Some("Me"));
        let mut course = original.clone();
        let err = document(json!([
            { "op": "replace", "path": "/title", "value": "Changed" },
            { "op": "test", "path": "/description", "value": "Someone else" }
        ]))
        .apply_to(&mut course)
        .unwrap_err();

        assert_eq!(
            err,
            PatchError::TestFailed {
                path: "/description".into()
            }
        );
        assert_eq!(course, original);
    }

    #[test]
    fn unknown_paths_and_non_string_values_are_rejected() {
        let mut course = CourseForUpdate::default();
        let err = document(json!([{ "op": "replace", "path": "/authorId", "value": "x" }]))
            .apply_to(&mut course)
            .unwrap_err();
        assert!(matches!(err, PatchError::UnknownPath { .. }));

        let err = document(json!([{ "op": "replace", "path": "/title", "value": 42 }]))
            .apply_to(&mut course)
            .unwrap_err();
        assert_eq!(Violation::from(err).field, "title");
    }

    #[test]
    fn nested_pointers_are_unknown() {
        assert!(CourseMember::parse("/title/0").is_err());
        assert!(CourseMember::parse("title").is_err());
        assert_eq!(CourseMember::parse("/description"), Ok(CourseMember::Description));
    }
}

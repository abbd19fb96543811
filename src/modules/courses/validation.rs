//! Field-level and cross-field rules for course representations.
//!
//! Rules run in order against the fully merged representation and every violation is
//! collected; nothing short-circuits.

use serde::Serialize;
use thiserror::Error;

use super::models::CourseForManipulation;

pub const TITLE_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 1500;

/// Field name reported for rules that span the whole course.
pub const COURSE_FIELD: &str = "course";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Same violation reported under a nested field path, e.g. `courses[2].title`.
    pub fn nested(self, prefix: &str) -> Self {
        Self {
            field: format!("{prefix}.{}", self.field),
            message: self.message,
        }
    }
}

/// Accumulated violations for one representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", render(.0))]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<Violation>> for ValidationErrors {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

type Rule = fn(&CourseForManipulation) -> Option<Violation>;

const COURSE_RULES: &[Rule] = &[
    title_required,
    title_max_length,
    description_max_length,
    title_differs_from_description,
];

/// Run every course rule and return all violations at once.
pub fn validate_course(course: &CourseForManipulation) -> Result<(), ValidationErrors> {
    ValidationErrors(COURSE_RULES.iter().filter_map(|rule| rule(course)).collect()).into_result()
}

/// Title and description must differ (ordinal comparison) when both are present.
pub fn is_consistent(title: &str, description: Option<&str>) -> bool {
    match description {
        Some(description) if !title.is_empty() && !description.is_empty() => title != description,
        _ => true,
    }
}

fn title_required(course: &CourseForManipulation) -> Option<Violation> {
    match course.title.as_deref() {
        Some(title) if !title.trim().is_empty() => None,
        _ => Some(Violation::new("title", "You should fill out a title")),
    }
}

fn title_max_length(course: &CourseForManipulation) -> Option<Violation> {
    exceeds("title", course.title.as_deref(), TITLE_MAX_LENGTH)
}

fn description_max_length(course: &CourseForManipulation) -> Option<Violation> {
    exceeds("description", course.description.as_deref(), DESCRIPTION_MAX_LENGTH)
}

fn exceeds(field: &str, value: Option<&str>, max: usize) -> Option<Violation> {
    value.filter(|v| v.chars().count() > max).map(|_| {
        Violation::new(
            field,
            format!("The field {field} must be at most {max} characters long"),
        )
    })
}

fn title_differs_from_description(course: &CourseForManipulation) -> Option<Violation> {
    let title = course.title.as_deref().unwrap_or_default();
    (!is_consistent(title, course.description.as_deref())).then(|| {
        Violation::new(
            COURSE_FIELD,
            "The provided description should be different from the title",
        )
    })
}

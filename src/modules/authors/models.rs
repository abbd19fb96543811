use courselib_db::{Author, Course, IdAssignment, Page};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::modules::courses::models::CourseForCreation;

/// Author as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub main_category: String,
}

impl AuthorDto {
    pub fn from_author(author: &Author, today: Date) -> Self {
        Self {
            id: author.id,
            name: author.full_name(),
            age: author.age_on(today),
            main_category: author.main_category.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, OffsetDateTime::now_utc().date())
    }
}

/// Body of `POST /api/authors`, optionally carrying the author's first courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreation {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    #[serde(default)]
    pub date_of_death: Option<Date>,
    pub main_category: String,
    #[serde(default)]
    pub courses: Vec<CourseForCreation>,
}

impl AuthorForCreation {
    /// New author with a generated id, plus its courses. Courses must be validated first.
    pub fn to_entities(&self) -> (Author, Vec<Course>) {
        let author = Author {
            id: IdAssignment::Generated.resolve(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
            main_category: self.main_category.clone(),
        };
        let courses = self
            .courses
            .iter()
            .map(|course| course.to_course(author.id, IdAssignment::Generated))
            .collect();
        (author, courses)
    }
}

/// Paging metadata sent in the `X-Pagination` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_page_link: Option<String>,
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    pub fn new<T>(
        page: &Page<T>,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> Self {
        Self {
            total_count: page.total_matched,
            page_size: page.page_size,
            current_page: page.page_number,
            total_pages: page.total_pages(),
            previous_page_link,
            next_page_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn dto_derives_name_and_age() {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: "Eli".into(),
            last_name: "Ivory Bones Sweet".into(),
            date_of_birth: date!(1701 - 12 - 16),
            date_of_death: None,
            main_category: "Singing".into(),
        };
        let dto = AuthorDto::from_author(&author, date!(2001 - 12 - 15));
        assert_eq!(dto.name, "Eli Ivory Bones Sweet");
        assert_eq!(dto.age, 299);
        assert_eq!(dto.main_category, "Singing");
    }

    #[test]
    fn creation_body_parses_dates_and_nested_courses() {
        let body: AuthorForCreation = serde_json::from_value(serde_json::json!({
            "firstName": "Jane",
            "lastName": "Skewers",
            "dateOfBirth": "1968-04-21",
            "mainCategory": "Rum",
            "courses": [{ "title": "Top Pirate Hits of Last Decade", "description": "Learn the lyrics" }]
        }))
        .unwrap();
        assert_eq!(body.date_of_birth, date!(1968 - 04 - 21));

        let (author, courses) = body.to_entities();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].author_id, author.id);
        assert_ne!(courses[0].id, author.id);
    }
}

//! Authors resource, with each author's courses nested beneath it.

pub mod handlers;
pub mod models;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use courselib_db::LibraryStore;
use courselib_kernel::{InitCtx, Module};
use serde_json::json;

use crate::modules::{courses, merge_fragment};
use crate::utils::log_prefix;

pub struct AuthorsModule {
    store: Arc<LibraryStore>,
}

impl AuthorsModule {
    pub fn new(store: Arc<LibraryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = %log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/",
                get(handlers::list_authors)
                    .post(handlers::create_author)
                    .options(handlers::options),
            )
            .route(
                "/{author_id}",
                get(handlers::get_author).delete(handlers::delete_author),
            )
            .merge(courses::routes())
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut document = openapi_fragment();
        merge_fragment(&mut document, courses::openapi_fragment());
        Some(document)
    }
}

fn openapi_fragment() -> serde_json::Value {
    let error = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        })
    };
    let author_body = json!({
        "description": "Author",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Author" } } }
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List authors with filtering, search and paging",
                    "tags": ["Authors"],
                    "parameters": [
                        { "name": "mainCategory", "in": "query", "schema": { "type": "string" } },
                        { "name": "searchQuery", "in": "query", "schema": { "type": "string" } },
                        { "name": "pageNumber", "in": "query", "schema": { "type": "integer", "minimum": 1, "default": courselib_db::query::DEFAULT_PAGE_NUMBER } },
                        { "name": "pageSize", "in": "query", "schema": { "type": "integer", "minimum": 1, "maximum": courselib_db::MAX_PAGE_SIZE, "default": courselib_db::query::DEFAULT_PAGE_SIZE } }
                    ],
                    "responses": {
                        "200": {
                            "description": "One page of authors; paging metadata in the X-Pagination header",
                            "headers": { "X-Pagination": { "schema": { "$ref": "#/components/schemas/PaginationMetadata" } } },
                            "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Author" } } } }
                        }
                    }
                },
                "post": {
                    "summary": "Create an author, optionally with courses",
                    "tags": ["Authors"],
                    "requestBody": { "required": true, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/AuthorForCreation" } } } },
                    "responses": {
                        "201": author_body.clone(),
                        "422": error("Validation failed")
                    }
                },
                "options": {
                    "summary": "Supported methods",
                    "tags": ["Authors"],
                    "responses": { "200": { "description": "Allow header lists the supported methods" } }
                }
            },
            "/{author_id}": {
                "get": {
                    "summary": "Get one author",
                    "tags": ["Authors"],
                    "parameters": [{ "name": "author_id", "in": "path", "required": true, "schema": { "type": "string", "format": "uuid" } }],
                    "responses": {
                        "200": author_body,
                        "404": error("Author not found")
                    }
                },
                "delete": {
                    "summary": "Delete an author and its courses",
                    "tags": ["Authors"],
                    "parameters": [{ "name": "author_id", "in": "path", "required": true, "schema": { "type": "string", "format": "uuid" } }],
                    "responses": {
                        "204": { "description": "Author deleted" },
                        "404": error("Author not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Author": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "name": { "type": "string" },
                        "age": { "type": "integer" },
                        "mainCategory": { "type": "string" }
                    },
                    "required": ["id", "name", "age", "mainCategory"]
                },
                "AuthorForCreation": {
                    "type": "object",
                    "properties": {
                        "firstName": { "type": "string" },
                        "lastName": { "type": "string" },
                        "dateOfBirth": { "type": "string", "format": "date" },
                        "dateOfDeath": { "type": "string", "format": "date", "nullable": true },
                        "mainCategory": { "type": "string" },
                        "courses": { "type": "array", "items": { "$ref": "#/components/schemas/CourseForManipulation" } }
                    },
                    "required": ["firstName", "lastName", "dateOfBirth", "mainCategory"]
                },
                "PaginationMetadata": {
                    "type": "object",
                    "properties": {
                        "totalCount": { "type": "integer" },
                        "pageSize": { "type": "integer" },
                        "currentPage": { "type": "integer" },
                        "totalPages": { "type": "integer" },
                        "previousPageLink": { "type": "string", "nullable": true },
                        "nextPageLink": { "type": "string", "nullable": true }
                    }
                }
            }
        }
    })
}

/// Create the authors module around the shared store
pub fn create_module(store: Arc<LibraryStore>) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_includes_nested_course_paths() {
        let module = AuthorsModule::new(Arc::new(LibraryStore::new()));
        let document = module.openapi().unwrap();
        assert!(document["paths"]["/"]["get"].is_object());
        assert!(document["paths"]["/{author_id}/courses/{course_id}"]["patch"].is_object());
        assert!(document["components"]["schemas"]["CourseForManipulation"].is_object());
    }
}

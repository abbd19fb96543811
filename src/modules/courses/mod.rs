//! Courses nested under their owning author.
//!
//! Not a standalone module: the routes are merged into the `authors` router so they live
//! under `/api/authors/{authorId}/courses`.

pub mod handlers;
pub mod models;
pub mod patch;
pub mod reconcile;
pub mod service;
pub mod validation;

use std::sync::Arc;

use axum::{routing::get, Router};
use courselib_db::LibraryStore;

/// Course routes, relative to the authors mount point.
pub fn routes() -> Router<Arc<LibraryStore>> {
    Router::new()
        .route(
            "/{author_id}/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/{author_id}/courses/{course_id}",
            get(handlers::get_course)
                .put(handlers::update_course)
                .patch(handlers::patch_course)
                .delete(handlers::delete_course),
        )
}

/// OpenAPI paths and schemas for the course routes.
pub fn openapi_fragment() -> serde_json::Value {
    let error = |description: &str| {
        serde_json::json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        })
    };
    let course_body = |schema: &str| {
        serde_json::json!({
            "description": "Course",
            "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{schema}") } } }
        })
    };
    let ids = serde_json::json!([
        { "name": "author_id", "in": "path", "required": true, "schema": { "type": "string", "format": "uuid" } },
        { "name": "course_id", "in": "path", "required": true, "schema": { "type": "string", "format": "uuid" } }
    ]);

    serde_json::json!({
        "paths": {
            "/{author_id}/courses": {
                "get": {
                    "summary": "List an author's courses",
                    "tags": ["Courses"],
                    "parameters": [ids[0]],
                    "responses": {
                        "200": {
                            "description": "Courses of the author",
                            "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Course" } } } }
                        },
                        "404": error("Author not found")
                    }
                },
                "post": {
                    "summary": "Create a course with a server-generated id",
                    "tags": ["Courses"],
                    "parameters": [ids[0]],
                    "requestBody": { "required": true, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/CourseForManipulation" } } } },
                    "responses": {
                        "201": course_body("Course"),
                        "404": error("Author not found"),
                        "422": error("Validation failed")
                    }
                }
            },
            "/{author_id}/courses/{course_id}": {
                "get": {
                    "summary": "Get one course",
                    "tags": ["Courses"],
                    "parameters": ids,
                    "responses": {
                        "200": course_body("Course"),
                        "404": error("Author or course not found")
                    }
                },
                "put": {
                    "summary": "Replace a course, creating it under the given id if absent",
                    "tags": ["Courses"],
                    "parameters": ids,
                    "requestBody": { "required": true, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/CourseForManipulation" } } } },
                    "responses": {
                        "201": course_body("Course"),
                        "204": { "description": "Course updated" },
                        "404": error("Author not found"),
                        "409": error("Course id belongs to another author"),
                        "422": error("Validation failed")
                    }
                },
                "patch": {
                    "summary": "Apply a JSON Patch, creating the course under the given id if absent",
                    "tags": ["Courses"],
                    "parameters": ids,
                    "requestBody": { "required": true, "content": { "application/json-patch+json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/PatchOperation" } } } } },
                    "responses": {
                        "201": course_body("Course"),
                        "204": { "description": "Course updated" },
                        "404": error("Author not found"),
                        "409": error("Course id belongs to another author"),
                        "422": error("Validation failed")
                    }
                },
                "delete": {
                    "summary": "Delete a course",
                    "tags": ["Courses"],
                    "parameters": ids,
                    "responses": {
                        "204": { "description": "Course deleted" },
                        "404": error("Author or course not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Course": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "title": { "type": "string" },
                        "description": { "type": "string", "nullable": true },
                        "authorId": { "type": "string", "format": "uuid" }
                    },
                    "required": ["id", "title", "authorId"]
                },
                "CourseForManipulation": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "maxLength": validation::TITLE_MAX_LENGTH },
                        "description": { "type": "string", "maxLength": validation::DESCRIPTION_MAX_LENGTH, "nullable": true }
                    },
                    "required": ["title"]
                },
                "PatchOperation": {
                    "type": "object",
                    "properties": {
                        "op": { "type": "string", "enum": ["add", "remove", "replace", "copy", "move", "test"] },
                        "path": { "type": "string", "example": "/title" },
                        "from": { "type": "string" },
                        "value": { "type": "string", "nullable": true }
                    },
                    "required": ["op", "path"]
                }
            }
        }
    })
}

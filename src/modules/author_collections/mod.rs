//! Batch author resource addressed by a comma-delimited id list, e.g.
//! `/api/authorcollections/(id1,id2)`.

pub mod handlers;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use courselib_db::LibraryStore;
use courselib_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils::log_prefix;

pub struct AuthorCollectionsModule {
    store: Arc<LibraryStore>,
}

#[async_trait]
impl Module for AuthorCollectionsModule {
    fn name(&self) -> &'static str {
        "authorcollections"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = %log_prefix(self.name()), "author collections module initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(handlers::create_author_collection))
            .route("/{ids}", get(handlers::get_author_collection))
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
            })
        };
        let authors = json!({
            "description": "Authors",
            "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Author" } } } }
        });

        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Create several authors in one request",
                        "tags": ["AuthorCollections"],
                        "requestBody": { "required": true, "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/AuthorForCreation" } } } } },
                        "responses": {
                            "201": authors.clone(),
                            "400": error("Empty collection"),
                            "422": error("Validation failed")
                        }
                    }
                },
                "/{ids}": {
                    "get": {
                        "summary": "Get several authors by id",
                        "tags": ["AuthorCollections"],
                        "parameters": [{
                            "name": "ids",
                            "in": "path",
                            "required": true,
                            "description": "Comma-separated author ids, optionally wrapped in parentheses",
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": authors,
                            "400": error("Missing or malformed ids"),
                            "404": error("Some of the requested authors were not found")
                        }
                    }
                }
            }
        }))
    }
}

pub fn create_module(store: Arc<LibraryStore>) -> Arc<dyn Module> {
    Arc::new(AuthorCollectionsModule { store })
}

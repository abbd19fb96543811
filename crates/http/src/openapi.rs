//! Merges per-module OpenAPI fragments into one document.

use serde_json::{json, Value};

use courselib_kernel::ModuleRegistry;

const API_TITLE: &str = "Course Library API";
const API_VERSION: &str = "1.0.0";

fn base_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": "Authors and their courses"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "type": "object",
                            "properties": {
                                "code": { "type": "string" },
                                "message": { "type": "string" },
                                "details": { "type": "array", "items": {} },
                                "trace_id": { "type": "string" },
                                "timestamp": { "type": "string" }
                            },
                            "required": ["code", "message", "trace_id", "timestamp"]
                        }
                    },
                    "required": ["error"]
                }
            }
        }
    })
}

/// Collect every module's paths (prefixed with `/api/{module}`) and schemas.
pub fn collect(registry: &ModuleRegistry) -> Value {
    let mut document = base_document();

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let prefixed = if path == "/" {
                    format!("/api/{}", module.name())
                } else {
                    format!("/api/{}{}", module.name(), path)
                };
                document["paths"][prefixed] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
        {
            for (name, schema) in schemas {
                document["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    document
}

/// Typed view for Swagger UI; falls back to a bare document if the merge is not valid OpenAPI.
pub fn to_openapi(document: &Value) -> utoipa::openapi::OpenApi {
    serde_json::from_value(document.clone()).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "merged OpenAPI document rejected, serving empty document");
        utoipa::openapi::OpenApiBuilder::new()
            .info(
                utoipa::openapi::InfoBuilder::new()
                    .title(API_TITLE)
                    .version(API_VERSION)
                    .build(),
            )
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use courselib_kernel::Module;
    use std::sync::Arc;

    struct Fragment;

    impl Module for Fragment {
        fn name(&self) -> &'static str {
            "widgets"
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": {
                    "/": { "get": { "summary": "List", "responses": {} } },
                    "/{id}": { "get": { "summary": "One", "responses": {} } }
                },
                "components": { "schemas": { "Widget": { "type": "object" } } }
            }))
        }
    }

    #[test]
    fn module_paths_are_prefixed_and_schemas_merged() {
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(Fragment));

        let document = collect(&registry);
        assert!(document["paths"]["/api/widgets"].is_object());
        assert!(document["paths"]["/api/widgets/{id}"].is_object());
        assert!(document["paths"]["/healthz"].is_object());
        assert!(document["components"]["schemas"]["Widget"].is_object());
        assert!(document["components"]["schemas"]["ErrorResponse"].is_object());
    }
}

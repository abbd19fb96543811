pub mod author_collections;
pub mod authors;
pub mod courses;
pub mod error;
pub mod links;

use std::sync::Arc;

use courselib_db::LibraryStore;
use courselib_kernel::ModuleRegistry;
use serde_json::Value;

/// Register the store and every resource module with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<LibraryStore>) {
    registry.register_core(courselib_db::create_module(store.clone()));
    registry.register_custom(authors::create_module(store.clone()));
    registry.register_custom(author_collections::create_module(store));
}

/// Fold `fragment`'s paths and schemas into `target`.
pub(crate) fn merge_fragment(target: &mut Value, fragment: Value) {
    if let Some(paths) = fragment["paths"].as_object() {
        for (path, item) in paths {
            target["paths"][path] = item.clone();
        }
    }
    if let Some(schemas) = fragment["components"]["schemas"].as_object() {
        for (name, schema) in schemas {
            target["components"]["schemas"][name] = schema.clone();
        }
    }
}

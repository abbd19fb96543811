//! In-memory persistence for authors and courses.

pub mod entities;
pub mod query;
pub mod seed;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use courselib_kernel::{InitCtx, Module};

pub use entities::{Author, Course, IdAssignment};
pub use query::{AuthorResourceParameters, Page, QueryParameters, MAX_PAGE_SIZE};
pub use store::{LibraryState, LibraryStore, StoreError, UnitOfWork};

/// Core module owning the shared store; seeds demo data during init when configured.
pub struct DbModule {
    store: Arc<LibraryStore>,
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.store.seed_demo_data {
            let mutations =
                seed::seed_demo_data(&self.store).context("failed to seed demo catalogue")?;
            tracing::info!(target: "courselib-db", mutations, "demo catalogue seeded");
        }

        let (authors, courses) = {
            let state = self.store.read();
            (state.author_count(), state.course_count())
        };
        tracing::info!(target: "courselib-db", authors, courses, "library store ready");
        Ok(())
    }
}

/// Create the core `db` module around a shared store
pub fn create_module(store: Arc<LibraryStore>) -> Arc<dyn Module> {
    Arc::new(DbModule { store })
}

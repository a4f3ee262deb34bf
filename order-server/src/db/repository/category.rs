//! Category Repository

use super::RepoResult;
use crate::db::JsonStore;
use shared::error::{AppError, ErrorCode};
use shared::models::{Category, CategoryUpdate};

#[derive(Clone)]
pub struct CategoryRepository {
    store: JsonStore,
}

impl CategoryRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// All categories ordered by `displayOrder`
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut categories = self.store.load().await?.categories;
        categories.sort_by_key(|c| c.display_order);
        Ok(categories)
    }

    pub async fn create(&self, category: Category) -> RepoResult<Category> {
        self.store
            .mutate(move |doc| {
                doc.categories.push(category.clone());
                Ok(category)
            })
            .await
    }

    pub async fn update(&self, id: &str, update: CategoryUpdate) -> RepoResult<Category> {
        self.store
            .mutate(|doc| {
                let category = doc
                    .categories
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| not_found(id))?;
                category.apply(update);
                Ok(category.clone())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .mutate(|doc| {
                let before = doc.categories.len();
                doc.categories.retain(|c| c.id != id);
                if doc.categories.len() == before {
                    return Err(not_found(id));
                }
                Ok(())
            })
            .await
    }
}

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::CategoryNotFound).with_detail("id", id)
}

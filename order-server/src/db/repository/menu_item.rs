//! Menu Item Repository

use super::RepoResult;
use crate::db::JsonStore;
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, MenuItemUpdate};

#[derive(Clone)]
pub struct MenuItemRepository {
    store: JsonStore,
}

impl MenuItemRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        Ok(self.store.load().await?.menu_items)
    }

    /// Items customers can order
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        let mut items = self.find_all().await?;
        items.retain(|item| item.available);
        Ok(items)
    }

    pub async fn create(&self, item: MenuItem) -> RepoResult<MenuItem> {
        self.store
            .mutate(move |doc| {
                doc.menu_items.push(item.clone());
                Ok(item)
            })
            .await
    }

    pub async fn update(&self, id: &str, update: MenuItemUpdate) -> RepoResult<MenuItem> {
        self.store
            .mutate(|doc| {
                let item = doc
                    .menu_items
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or_else(|| not_found(id))?;
                item.apply(update);
                Ok(item.clone())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .mutate(|doc| {
                let before = doc.menu_items.len();
                doc.menu_items.retain(|m| m.id != id);
                if doc.menu_items.len() == before {
                    return Err(not_found(id));
                }
                Ok(())
            })
            .await
    }
}

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id)
}

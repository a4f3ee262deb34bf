//! Dining Table Repository

use super::RepoResult;
use crate::db::JsonStore;
use shared::error::{AppError, ErrorCode};
use shared::models::{TABLE_ID_PREFIX, Table, TableStatus};

#[derive(Clone)]
pub struct DiningTableRepository {
    store: JsonStore,
}

impl DiningTableRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// All tables ordered by number
    pub async fn find_all(&self) -> RepoResult<Vec<Table>> {
        let mut tables = self.store.load().await?.tables;
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Table>> {
        let doc = self.store.load().await?;
        Ok(doc.tables.into_iter().find(|t| t.id == id))
    }

    /// New `available` table; numbers are unique
    pub async fn create(&self, number: u32, capacity: u32) -> RepoResult<Table> {
        self.store
            .mutate(|doc| {
                if doc.tables.iter().any(|t| t.number == number) {
                    return Err(AppError::with_message(
                        ErrorCode::AlreadyExists,
                        format!("Table number {number} already exists"),
                    ));
                }
                let table = Table {
                    id: format!("{TABLE_ID_PREFIX}{}", uuid::Uuid::new_v4()),
                    number,
                    capacity,
                    status: TableStatus::Available,
                    qr_code: Table::qr_label(number),
                };
                doc.tables.push(table.clone());
                Ok(table)
            })
            .await
    }

    pub async fn update_status(&self, id: &str, status: TableStatus) -> RepoResult<Table> {
        self.store
            .mutate(|doc| {
                let table = doc
                    .tables
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| not_found(id))?;
                table.status = status;
                Ok(table.clone())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .mutate(|doc| {
                let before = doc.tables.len();
                doc.tables.retain(|t| t.id != id);
                if doc.tables.len() == before {
                    return Err(not_found(id));
                }
                Ok(())
            })
            .await
    }
}

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::TableNotFound).with_detail("id", id)
}

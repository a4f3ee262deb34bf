//! Staff Call Repository

use chrono::Utc;

use super::RepoResult;
use crate::db::JsonStore;
use shared::error::{AppError, ErrorCode};
use shared::models::{StaffCall, StaffCallStatus};

#[derive(Clone)]
pub struct StaffCallRepository {
    store: JsonStore,
}

impl StaffCallRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// All calls, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<StaffCall>> {
        let mut calls = self.store.load().await?.staff_calls;
        calls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(calls)
    }

    pub async fn create(&self, call: StaffCall) -> RepoResult<StaffCall> {
        self.store
            .mutate(move |doc| {
                doc.staff_calls.push(call.clone());
                Ok(call)
            })
            .await
    }

    /// Apply a status change; entering `resolved` stamps `resolvedAt`
    pub async fn update_status(&self, id: &str, next: StaffCallStatus) -> RepoResult<StaffCall> {
        self.store
            .mutate(|doc| {
                let call = doc
                    .staff_calls
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| not_found(id))?;
                call.status.check_transition(next)?;
                call.status = next;
                if next == StaffCallStatus::Resolved {
                    call.resolved_at = Some(Utc::now());
                }
                Ok(call.clone())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .mutate(|doc| {
                let before = doc.staff_calls.len();
                doc.staff_calls.retain(|c| c.id != id);
                if doc.staff_calls.len() == before {
                    return Err(not_found(id));
                }
                Ok(())
            })
            .await
    }
}

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::StaffCallNotFound).with_detail("id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StaffCallType;

    fn call(id: &str) -> StaffCall {
        StaffCall {
            id: id.into(),
            table_id: "table-3".into(),
            call_type: StaffCallType::Assistance,
            message: String::new(),
            status: StaffCallStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_sets_timestamp() {
        let repo = StaffCallRepository::new(JsonStore::memory());
        repo.create(call("call-1")).await.unwrap();

        let in_progress = repo
            .update_status("call-1", StaffCallStatus::InProgress)
            .await
            .unwrap();
        assert!(in_progress.resolved_at.is_none());

        let resolved = repo
            .update_status("call-1", StaffCallStatus::Resolved)
            .await
            .unwrap();
        assert!(resolved.resolved_at.is_some());
    }

    #[tokio::test]
    async fn test_resolved_is_terminal() {
        let repo = StaffCallRepository::new(JsonStore::memory());
        repo.create(call("call-1")).await.unwrap();
        let resolved = repo
            .update_status("call-1", StaffCallStatus::Resolved)
            .await
            .unwrap();

        let err = repo
            .update_status("call-1", StaffCallStatus::Pending)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StaffCallAlreadyResolved);

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored[0].resolved_at, resolved.resolved_at);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let repo = StaffCallRepository::new(JsonStore::memory());
        let err = repo.delete("call-x").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StaffCallNotFound);
    }
}

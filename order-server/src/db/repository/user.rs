//! User Repository
//!
//! Emails are unique, compared case-insensitively.

use super::RepoResult;
use crate::db::JsonStore;
use shared::error::{AppError, ErrorCode};
use shared::models::{User, UserRole};

/// Field changes for an existing user; `password_hash` is already hashed
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Clone)]
pub struct UserRepository {
    store: JsonStore,
}

impl UserRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.store.load().await?.users)
    }

    pub async fn count(&self) -> RepoResult<usize> {
        Ok(self.store.load().await?.users.len())
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let doc = self.store.load().await?;
        Ok(doc.users.into_iter().find(|u| same_email(&u.email, email)))
    }

    pub async fn create(&self, user: User) -> RepoResult<User> {
        self.store
            .mutate(move |doc| {
                if doc.users.iter().any(|u| same_email(&u.email, &user.email)) {
                    return Err(AppError::new(ErrorCode::UserEmailExists));
                }
                doc.users.push(user.clone());
                Ok(user)
            })
            .await
    }

    /// Create `user` only when the store has no users at all.
    ///
    /// Returns `None` when users already exist.
    pub async fn create_if_empty(&self, user: User) -> RepoResult<Option<User>> {
        self.store
            .mutate(move |doc| {
                if !doc.users.is_empty() {
                    return Ok(None);
                }
                doc.users.push(user.clone());
                Ok(Some(user))
            })
            .await
    }

    pub async fn update(&self, id: &str, patch: UserPatch) -> RepoResult<User> {
        self.store
            .mutate(|doc| {
                if let Some(email) = &patch.email
                    && doc
                        .users
                        .iter()
                        .any(|u| u.id != id && same_email(&u.email, email))
                {
                    return Err(AppError::new(ErrorCode::UserEmailExists));
                }
                let user = doc
                    .users
                    .iter_mut()
                    .find(|u| u.id == id)
                    .ok_or_else(|| not_found(id))?;
                if let Some(name) = patch.name {
                    user.name = name;
                }
                if let Some(email) = patch.email {
                    user.email = email;
                }
                if let Some(hash) = patch.password_hash {
                    user.password = hash;
                }
                if let Some(role) = patch.role {
                    user.role = role;
                }
                Ok(user.clone())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .mutate(|doc| {
                let before = doc.users.len();
                doc.users.retain(|u| u.id != id);
                if doc.users.len() == before {
                    return Err(not_found(id));
                }
                Ok(())
            })
            .await
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::UserNotFound).with_detail("id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.into(),
            name: id.into(),
            email: email.into(),
            password: "hash".into(),
            role: UserRole::Customer,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_email_unique_case_insensitive() {
        let repo = UserRepository::new(JsonStore::memory());
        repo.create(user("u1", "staff@example.com")).await.unwrap();
        let err = repo
            .create(user("u2", "Staff@Example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserEmailExists);
        assert!(repo.find_by_email("STAFF@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let repo = UserRepository::new(JsonStore::memory());
        repo.create(user("u1", "a@example.com")).await.unwrap();
        repo.create(user("u2", "b@example.com")).await.unwrap();

        let patch = UserPatch {
            email: Some("a@example.com".into()),
            ..Default::default()
        };
        let err = repo.update("u2", patch).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserEmailExists);

        // keeping its own email is fine
        let patch = UserPatch {
            email: Some("b@example.com".into()),
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        let updated = repo.update("u2", patch).await.unwrap();
        assert_eq!(updated.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_create_if_empty() {
        let repo = UserRepository::new(JsonStore::memory());
        assert!(repo.create_if_empty(user("u1", "a@example.com")).await.unwrap().is_some());
        assert!(repo.create_if_empty(user("u2", "b@example.com")).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}

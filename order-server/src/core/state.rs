//! Shared server state

use std::sync::Arc;

use chrono::Utc;

use crate::auth::{JwtService, hash_password};
use crate::core::Config;
use crate::db::JsonStore;
use crate::db::repository::UserRepository;
use crate::notify::NotificationCenter;
use crate::utils::{AppError, AppResult};
use shared::SessionSigner;
use shared::models::{User, UserRole};
use shared::util::prefixed_id;

/// State handed to every handler; cheap to clone
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: JsonStore,
    pub jwt: Arc<JwtService>,
    pub sessions: Arc<SessionSigner>,
    pub notifications: NotificationCenter,
}

impl ServerState {
    /// Build state from an already opened store; no filesystem side effects
    pub fn new(config: &Config, store: JsonStore) -> AppResult<Self> {
        let sessions = SessionSigner::new(config.session_secret.as_bytes())?;
        Ok(Self {
            config: Arc::new(config.clone()),
            store,
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            sessions: Arc::new(sessions),
            notifications: NotificationCenter::new(Utc::now()),
        })
    }

    /// Open the store, prepare the upload directory and bootstrap the first admin
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let store = match &config.data_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using JSON document store");
                JsonStore::open(path)
            }
            None => {
                tracing::warn!("DATA_FILE is empty, data is kept in memory only");
                JsonStore::memory()
            }
        };

        // surfaces a corrupted document at startup instead of on first request
        let doc = store.load().await?;
        tracing::info!(
            version = doc.version,
            orders = doc.orders.len(),
            menu_items = doc.menu_items.len(),
            "Store loaded"
        );

        let menu_dir = config.upload_dir.join("menu");
        tokio::fs::create_dir_all(&menu_dir).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create upload directory {}: {e}",
                menu_dir.display()
            ))
        })?;

        let state = Self::new(config, store)?;
        state.bootstrap_admin().await?;
        Ok(state)
    }

    async fn bootstrap_admin(&self) -> AppResult<()> {
        let Some(admin) = &self.config.admin else {
            return Ok(());
        };

        let user = User {
            id: prefixed_id("user"),
            name: admin.name.clone(),
            email: admin.email.clone(),
            password: hash_password(&admin.password)?,
            role: UserRole::Admin,
            created_at: Utc::now(),
        };

        let repo = UserRepository::new(self.store.clone());
        match repo.create_if_empty(user).await? {
            Some(created) => tracing::info!(email = %created.email, "Bootstrap admin created"),
            None => tracing::debug!("Users already exist, admin bootstrap skipped"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AdminBootstrap;

    #[tokio::test]
    async fn test_initialize_bootstraps_admin_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::development();
        config.data_file = Some(dir.path().join("db.json"));
        config.upload_dir = dir.path().join("uploads");
        config.admin = Some(AdminBootstrap {
            email: "admin@example.com".into(),
            password: "admin-pass".into(),
            name: "Admin".into(),
        });

        let state = ServerState::initialize(&config).await.unwrap();
        assert!(dir.path().join("uploads/menu").is_dir());

        let users = UserRepository::new(state.store.clone());
        assert_eq!(users.count().await.unwrap(), 1);
        let admin = users.find_by_email("admin@example.com").await.unwrap().unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_ne!(admin.password, "admin-pass");

        // second start over the same file keeps a single user
        let state = ServerState::initialize(&config).await.unwrap();
        assert_eq!(UserRepository::new(state.store).count().await.unwrap(), 1);
    }
}

use std::path::PathBuf;
use std::time::Duration;

use crate::auth::JwtConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | DATA_FILE | data/db.json | JSON document; empty keeps data in memory |
/// | UPLOAD_DIR | public/uploads | Root of uploaded files, served at `/uploads` |
/// | PUBLIC_BASE_URL | http://localhost:3000 | Prefix of table QR URLs |
/// | JWT_SECRET | dev fallback | Admin token signing key (required outside development) |
/// | JWT_EXPIRATION_MINUTES | 1440 | Admin token lifetime |
/// | SESSION_SECRET | dev fallback | Ordering session signing key (required outside development) |
/// | STAFF_CALL_POLL_SECS | 5 | Staff call poll interval |
/// | ORDER_POLL_SECS | 5 | New order poll interval |
/// | LOG_LEVEL | info | Default log filter when RUST_LOG is unset |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | - | Daily rolling log files when the directory exists |
/// | ADMIN_EMAIL / ADMIN_PASSWORD / ADMIN_NAME | - | First admin, created when there are no users |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// `None` keeps the document in memory
    pub data_file: Option<PathBuf>,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    pub jwt: JwtConfig,
    pub session_secret: String,
    pub staff_call_poll_interval: Duration,
    pub order_poll_interval: Duration,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub admin: Option<AdminBootstrap>,
}

/// Credentials for the admin account created on an empty store
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let data_file = match std::env::var("DATA_FILE") {
            Ok(path) if path.trim().is_empty() => None,
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => Some(PathBuf::from("data/db.json")),
        };

        let admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap {
                    email,
                    password,
                    name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".into()),
                })
            }
            _ => None,
        };

        Ok(Self {
            http_port: Self::env_or("HTTP_PORT", 3000),
            data_file,
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/uploads")),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            jwt: JwtConfig {
                secret: Self::require_secret("JWT_SECRET", &environment)?,
                expiration_minutes: Self::env_or("JWT_EXPIRATION_MINUTES", 1440),
            },
            session_secret: Self::require_secret("SESSION_SECRET", &environment)?,
            staff_call_poll_interval: Duration::from_secs(Self::env_or("STAFF_CALL_POLL_SECS", 5)),
            order_poll_interval: Duration::from_secs(Self::env_or("ORDER_POLL_SECS", 5)),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: Self::env_or("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            admin,
            environment,
        })
    }

    /// In-memory development configuration
    pub fn development() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            data_file: None,
            upload_dir: PathBuf::from("public/uploads"),
            public_base_url: "http://localhost:3000".into(),
            jwt: JwtConfig {
                secret: "dev-JWT_SECRET-not-for-production".into(),
                expiration_minutes: 1440,
            },
            session_secret: "dev-SESSION_SECRET-not-for-production".into(),
            staff_call_poll_interval: Duration::from_secs(5),
            order_poll_interval: Duration::from_secs(5),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            admin: None,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

//! Table ordering session tokens
//!
//! A token looks like `session-<epoch millis>-<nonce><tag>`:
//! - `nonce`: 4 random bytes, hex (8 chars)
//! - `tag`: first 8 bytes of HMAC-SHA256(secret, `session-<millis>-<nonce>`), hex (16 chars)
//!
//! The creation time travels inside the token, so validation needs no
//! storage. A token is valid for [`SESSION_TTL_MS`] after creation.

use crate::error::{AppError, ErrorCode};
use chrono::{DateTime, TimeZone};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::fmt::Display;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_PREFIX: &str = "session";
/// 24 hours
pub const SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1000;

const NONCE_LEN: usize = 4;
const TAG_LEN: usize = 8;
const SUFFIX_HEX_LEN: usize = (NONCE_LEN + TAG_LEN) * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid session format")]
    InvalidFormat,
    #[error("invalid session signature")]
    InvalidSignature,
    #[error("session expired")]
    Expired,
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidFormat => AppError::new(ErrorCode::SessionInvalidFormat),
            SessionError::InvalidSignature => AppError::new(ErrorCode::SessionInvalidSignature),
            SessionError::Expired => AppError::new(ErrorCode::SessionExpired),
        }
    }
}

/// Data recovered from a well-formed, correctly signed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    pub created_at_ms: i64,
}

impl SessionClaims {
    pub fn expires_at_ms(&self) -> i64 {
        self.created_at_ms + SESSION_TTL_MS
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.created_at_ms >= SESSION_TTL_MS
    }
}

/// Issues and verifies session tokens with a server-side secret
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner").finish_non_exhaustive()
    }
}

impl SessionSigner {
    pub fn new(secret: &[u8]) -> Result<Self, AppError> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;
        Ok(Self { mac })
    }

    fn sign(&self, signed_part: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(signed_part.as_bytes());
        mac
    }

    /// New token created at `now_ms`
    pub fn issue(&self, now_ms: i64) -> String {
        let nonce: [u8; NONCE_LEN] = rand::thread_rng().r#gen();
        let signed_part = format!("{SESSION_PREFIX}-{now_ms}-{}", hex::encode(nonce));
        let tag = self.sign(&signed_part).finalize().into_bytes();
        format!("{signed_part}{}", hex::encode(&tag[..TAG_LEN]))
    }

    /// Check structure and signature, ignoring expiry
    pub fn decode(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let parts: Vec<&str> = token.split('-').collect();
        let [prefix, timestamp, suffix] = parts.as_slice() else {
            return Err(SessionError::InvalidFormat);
        };
        if *prefix != SESSION_PREFIX || suffix.is_empty() {
            return Err(SessionError::InvalidFormat);
        }
        if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SessionError::InvalidFormat);
        }
        let created_at_ms: i64 = timestamp
            .parse()
            .map_err(|_| SessionError::InvalidFormat)?;

        if suffix.len() != SUFFIX_HEX_LEN || !suffix.is_char_boundary(NONCE_LEN * 2) {
            return Err(SessionError::InvalidSignature);
        }
        let (nonce, tag_hex) = suffix.split_at(NONCE_LEN * 2);
        let tag = hex::decode(tag_hex).map_err(|_| SessionError::InvalidSignature)?;
        if hex::decode(nonce).is_err() {
            return Err(SessionError::InvalidSignature);
        }

        let signed_part = format!("{SESSION_PREFIX}-{timestamp}-{nonce}");
        self.sign(&signed_part)
            .verify_truncated_left(&tag)
            .map_err(|_| SessionError::InvalidSignature)?;

        Ok(SessionClaims { created_at_ms })
    }

    /// Full validation: structure, signature, then the 24 hour window
    pub fn validate(&self, token: &str, now_ms: i64) -> Result<SessionClaims, SessionError> {
        let claims = self.decode(token)?;
        if claims.is_expired(now_ms) {
            return Err(SessionError::Expired);
        }
        Ok(claims)
    }
}

/// Human-readable session label, `YYYYMMDD-HHMM` in the given zone
pub fn session_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%Y%m%d-%H%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    const T0: i64 = 1_714_560_000_000;

    fn signer() -> SessionSigner {
        SessionSigner::new(b"test-session-secret").unwrap()
    }

    #[test]
    fn test_issue_shape() {
        let token = signer().issue(T0);
        assert!(token.starts_with("session-"));
        let parts: Vec<&str> = token.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1], T0.to_string());
        assert_eq!(parts[2].len(), SUFFIX_HEX_LEN);
    }

    #[test]
    fn test_issue_is_unique() {
        let s = signer();
        assert_ne!(s.issue(T0), s.issue(T0));
    }

    #[test]
    fn test_valid_immediately() {
        let s = signer();
        let token = s.issue(T0);
        let claims = s.validate(&token, T0).unwrap();
        assert_eq!(claims.created_at_ms, T0);
        assert_eq!(claims.expires_at_ms(), T0 + SESSION_TTL_MS);
    }

    #[test]
    fn test_expiry_boundary() {
        let s = signer();
        let token = s.issue(T0);
        assert!(s.validate(&token, T0 + SESSION_TTL_MS - 1).is_ok());
        assert_eq!(
            s.validate(&token, T0 + SESSION_TTL_MS),
            Err(SessionError::Expired)
        );
        assert_eq!(
            s.validate(&token, T0 + SESSION_TTL_MS + 1),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let s = signer();
        for bad in [
            "",
            "session",
            "session-123",
            "session-123-",
            "sess-123-abc",
            "session-abc-0123456789abcdef01234567",
            "session--0123456789abcdef01234567",
            "session-+12-0123456789abcdef01234567",
            "session-1-2-3",
            "SESSION-1714560000000-0123456789abcdef01234567",
        ] {
            assert_eq!(
                s.validate(bad, T0),
                Err(SessionError::InvalidFormat),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_unsigned_token_rejected() {
        // the old unsigned shape: session-<millis>-<uuid segment>
        assert_eq!(
            signer().validate("session-1714560000000-a1b2c3d4", T0),
            Err(SessionError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_timestamp_rejected() {
        let s = signer();
        let token = s.issue(T0);
        let suffix = token.rsplit('-').next().unwrap();
        let forged = format!("session-{}-{suffix}", T0 + 60_000);
        assert_eq!(s.validate(&forged, T0), Err(SessionError::InvalidSignature));
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = signer().issue(T0);
        let other = SessionSigner::new(b"another-secret").unwrap();
        assert_eq!(other.validate(&token, T0), Err(SessionError::InvalidSignature));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let forged = "session-1-0123456789abcdef01234567";
        assert_eq!(
            signer().validate(forged, T0),
            Err(SessionError::InvalidSignature)
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::from(SessionError::Expired).code,
            ErrorCode::SessionExpired
        );
        assert_eq!(
            AppError::from(SessionError::InvalidFormat).code,
            ErrorCode::SessionInvalidFormat
        );
    }

    #[test]
    fn test_session_name() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(session_name(&at), "20240307-0905");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(session_name(&at.with_timezone(&tokyo)), "20240307-1805");
    }
}

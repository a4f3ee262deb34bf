//! Staff Call Model

use crate::error::{AppError, ErrorCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffCallType {
    Assistance,
    Payment,
    Cleaning,
    Other,
}

impl FromStr for StaffCallType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assistance" => Ok(Self::Assistance),
            "payment" => Ok(Self::Payment),
            "cleaning" => Ok(Self::Cleaning),
            "other" => Ok(Self::Other),
            other => Err(AppError::new(ErrorCode::StaffCallInvalidValue).with_detail("type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StaffCallStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl StaffCallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }

    pub fn can_transition_to(&self, next: StaffCallStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Resolved)
                | (Self::InProgress, Self::Resolved)
        )
    }

    pub fn check_transition(&self, next: StaffCallStatus) -> Result<(), AppError> {
        if self.can_transition_to(next) {
            return Ok(());
        }
        if *self == Self::Resolved {
            return Err(AppError::new(ErrorCode::StaffCallAlreadyResolved));
        }
        Err(AppError::with_message(
            ErrorCode::StaffCallInvalidTransition,
            format!("cannot move staff call from {} to {}", self.as_str(), next.as_str()),
        ))
    }
}

impl FromStr for StaffCallStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => {
                Err(AppError::new(ErrorCode::StaffCallInvalidValue).with_detail("status", other))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCall {
    pub id: String,
    pub table_id: String,
    #[serde(rename = "type")]
    pub call_type: StaffCallType,
    #[serde(default)]
    pub message: String,
    pub status: StaffCallStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Customer request for staff
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCallCreate {
    pub table_id: Option<String>,
    #[serde(rename = "type")]
    pub call_type: Option<String>,
    pub message: Option<String>,
}

/// Admin status change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCallUpdate {
    pub id: Option<String>,
    pub status: Option<String>,
}

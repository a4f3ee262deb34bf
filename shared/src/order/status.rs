//! Order status machine
//!
//! ```text
//! pending -> confirmed -> preparing -> ready -> completed
//!    |           |
//!    +-----------+--> cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal.

use crate::error::{AppError, ErrorCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Display rank, pending first
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 1,
            OrderStatus::Confirmed => 2,
            OrderStatus::Preparing => 3,
            OrderStatus::Ready => 4,
            OrderStatus::Completed => 5,
            OrderStatus::Cancelled => 6,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Still in the kitchen pipeline (counts towards "active orders")
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Preparing)
                | (Preparing, Ready)
                | (Ready, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }

    /// Check a transition, returning the reason it is refused
    pub fn check_transition(&self, next: OrderStatus) -> Result<(), TransitionError> {
        if self.can_transition_to(next) {
            return Ok(());
        }
        Err(match self {
            OrderStatus::Completed => TransitionError::AlreadyCompleted,
            OrderStatus::Cancelled => TransitionError::AlreadyCancelled,
            _ => TransitionError::NotAllowed {
                from: *self,
                to: next,
            },
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

impl From<ParseStatusError> for AppError {
    fn from(err: ParseStatusError) -> Self {
        AppError::new(ErrorCode::OrderInvalidStatus).with_detail("status", err.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("order has already been completed")]
    AlreadyCompleted,
    #[error("order has already been cancelled")]
    AlreadyCancelled,
    #[error("cannot move order from {from} to {to}")]
    NotAllowed { from: OrderStatus, to: OrderStatus },
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::AlreadyCompleted => AppError::new(ErrorCode::OrderAlreadyCompleted),
            TransitionError::AlreadyCancelled => AppError::new(ErrorCode::OrderAlreadyCancelled),
            TransitionError::NotAllowed { from, to } => {
                AppError::with_message(ErrorCode::OrderInvalidTransition, err.to_string())
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
        }
    }
}

/// Sort for staff display: status rank ascending, newest first within a rank.
///
/// `key` extracts `(status, created_at)` from each element. The sort is stable.
pub fn sort_for_display<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (OrderStatus, DateTime<Utc>),
{
    items.sort_by_key(|item| {
        let (status, created_at) = key(item);
        (status.rank(), Reverse(created_at))
    });
}

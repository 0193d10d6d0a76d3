//! Derived table rows.
//!
//! Rows are recomputed from a [`Snapshot`] on every render and never written back to the
//! cache. Deriving twice from the same snapshot and instant yields equal rows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::Snapshot;
use crate::user::User;

use super::Column;

/// Display status derived from a row's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user plus the display-only fields of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRow {
    #[serde(flatten)]
    pub user: User,
    /// True while the record is an unconfirmed optimistic create.
    pub pending: bool,
    pub status: UserStatus,
    pub last_login: DateTime<Utc>,
}

impl DerivedRow {
    /// Text used for display and for sorting by `column`.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Name => self.user.name.clone(),
            Column::Email => self.user.email.clone(),
            Column::Status => self.status.to_string(),
            Column::Role => self.user.role.clone(),
            Column::LastLogin => self.last_login.to_rfc3339(),
        }
    }

    /// Date part of the last login, e.g. `Mar 07, 2024`.
    pub fn last_login_date(&self) -> String {
        self.last_login.format("%b %d, %Y").to_string()
    }

    /// Time part of the last login, e.g. `09:05 AM`.
    pub fn last_login_time(&self) -> String {
        self.last_login.format("%I:%M %p").to_string()
    }
}

/// Status for the 1-based `position`: every third row is inactive.
pub fn status_for_position(position: usize) -> UserStatus {
    if position % 3 == 0 {
        UserStatus::Inactive
    } else {
        UserStatus::Active
    }
}

/// Derives one row per cached user, in snapshot order.
pub fn build_rows(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<DerivedRow> {
    snapshot
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| DerivedRow {
            user: entry.user.clone(),
            pending: entry.is_pending(),
            status: status_for_position(index + 1),
            last_login: now,
        })
        .collect()
}

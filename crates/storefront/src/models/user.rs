//! User model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fernway_core::{Email, UserId};

/// A customer account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Database ID.
    pub id: UserId,
    /// Email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

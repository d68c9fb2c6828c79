//! Domain model for user accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit stamps carried by every persisted record.
///
/// `created_by`/`modified_by` hold the login id of the acting principal,
/// or `None` when the mutation came from an unauthenticated caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

/// A user account.
///
/// `password` always holds a bcrypt hash once persisted, never plaintext,
/// and is skipped on serialization so it can never leak into a response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub login_id: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

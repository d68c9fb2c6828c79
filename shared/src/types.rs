//! API request and response types
//!
//! Field names are camelCase on the wire to match the existing clients.

use crate::models::User;
use serde::{Deserialize, Serialize};

/// Authentication request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub login_id: String,
    pub password: String,
}

/// Authentication response: the authenticated user plus a bearer token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    pub user: User,
    pub auth_token: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub login_id: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Update request: only login id and email are mutable this way.
/// Password changes go through the dedicated change-password endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub login_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Plain-message response (password change confirmation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for a stored upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponse {
    pub file_name: String,
    pub file_download_uri: String,
    pub file_type: String,
    pub size: u64,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_request_wire_names() {
        let req: AuthenticateRequest =
            serde_json::from_str(r#"{"loginId":"alice","password":"Pass1234"}"#).unwrap();
        assert_eq!(req.login_id, "alice");
        assert_eq!(req.password, "Pass1234");
    }

    #[test]
    fn test_register_request_email_optional() {
        let req: RegisterUserRequest =
            serde_json::from_str(r#"{"loginId":"bob","password":"Pass1234"}"#).unwrap();
        assert!(req.email.is_none());
    }

    #[test]
    fn test_change_password_wire_names() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"oldPassword":"a","newPassword":"b"}"#).unwrap();
        assert_eq!(req.old_password, "a");
        assert_eq!(req.new_password, "b");
    }

    #[test]
    fn test_upload_response_wire_names() {
        let resp = UploadFileResponse {
            file_name: "x.png".to_string(),
            file_download_uri: "/downloadFile/x.png".to_string(),
            file_type: "image/png".to_string(),
            size: 42,
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["fileName"], "x.png");
        assert_eq!(value["fileDownloadUri"], "/downloadFile/x.png");
        assert_eq!(value["fileType"], "image/png");
        assert_eq!(value["size"], 42);
    }
}

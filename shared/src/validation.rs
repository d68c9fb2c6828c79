//! Input validation functions
//!
//! Password and login-id policy checks shared between registration and
//! password change. Email syntax is validated at the service boundary
//! with the `validator` crate.

/// Maximum length of a login id.
pub const MAX_LOGIN_ID_LEN: usize = 50;

/// Validate password policy: length >= 8 and ASCII letters/digits only.
///
/// There is no upper bound on length. Applied at registration and to the
/// new password on a password change, never to existing hashes.
pub fn is_valid_password(candidate: &str) -> bool {
    candidate.len() >= 8 && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validate a login id: non-empty, at most [`MAX_LOGIN_ID_LEN`] characters.
pub fn validate_login_id(login_id: &str) -> Result<(), String> {
    if login_id.trim().is_empty() {
        return Err("Login ID is required".to_string());
    }
    if login_id.len() > MAX_LOGIN_ID_LEN {
        return Err(format!(
            "Login ID must be at most {} characters",
            MAX_LOGIN_ID_LEN
        ));
    }
    Ok(())
}

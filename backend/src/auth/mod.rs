//! Authentication module
//!
//! Provides JWT-based authentication with bcrypt password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{is_public_path, require_auth, AuthUser, OptionalAuthUser};
pub use password::PasswordService;

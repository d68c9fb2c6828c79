//! Business logic layer

mod file;
mod user;

pub use file::FileStorageService;
pub use user::UserService;

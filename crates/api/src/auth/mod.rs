//! Authentication primitives for Aviary

pub mod bearer;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod sessions;

pub use bearer::bearer_token;
pub use jwt::JwtManager;
pub use password::{hash_password, verify_password};
pub use sessions::SessionService;

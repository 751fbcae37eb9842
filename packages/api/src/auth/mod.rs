//! Admin authentication: a single operator password, checked against an Argon2 hash
//! from configuration, and a flag in the server-side session.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{is_admin, login, logout, password_matches, require_admin, SESSION_ADMIN_KEY};

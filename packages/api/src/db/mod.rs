//! # Database module — PostgreSQL connection pool and migrations
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so client (WASM) builds never pull
//! in SQLx or Tokio networking code.
//!
//! The pool is a **lazy, process-wide singleton** backed by a [`tokio::sync::OnceCell`].
//! The first call to [`get_pool`] reads the database URL and connection limit from
//! [`crate::settings`] and caches the pool for every later caller.
//!
//! [`migrate`] applies the embedded migrations under `packages/api/migrations`.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::{get_pool, migrate};

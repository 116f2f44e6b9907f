//! Test utilities shared across the dwing workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary credential store files ([`StoreGuard`])
//! - XDG directory isolation ([`EnvTestGuard`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod store;

// Re-export commonly used items
pub use env::EnvTestGuard;
pub use store::StoreGuard;

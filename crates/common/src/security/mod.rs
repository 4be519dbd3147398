//! Security primitives and memory safety utilities
//!
//! This module provides foundational security types and patterns used throughout
//! the opencrypto workspace to ensure proper handling of sensitive material.

pub mod buffer;
pub mod memory;
pub mod secret;

// Re-export core security types
pub use buffer::ConstantTimeBuffer;
pub use secret::{EphemeralSecret, SecretBuffer};

// Re-export memory safety traits and utilities
pub use memory::{barrier, ct_eq_fixed};

//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - Self-contained AES-256-GCM ciphertext envelopes (`envelope`)
//! - Argon2id secret-based key derivation (`kdf`)
//! - One-way secret hashing and verification gates (`gate`)

pub mod envelope;
pub mod gate;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, SecretGate, ...};
pub use envelope::{from_transport, open, seal, to_transport};
pub use gate::{GateParams, SecretGate, SecretPurpose};
pub use kdf::{derive_entry_key, generate_salt};

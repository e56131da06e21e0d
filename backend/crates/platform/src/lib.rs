//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, constant-time comparison)
//! - Password hashing (Argon2id with per-user salt, legacy SHA-256 digests)
//! - Signed bearer tokens (JWT, HS256)

pub mod crypto;
pub mod password;
pub mod token;

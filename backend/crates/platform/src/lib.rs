//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, Base64, constant-time comparison)
//! - Password hashing (Argon2id in the PHC string format)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;

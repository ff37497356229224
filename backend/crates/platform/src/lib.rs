//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, random tokens, constant-time eq)
//! - Password hashing (Argon2id with per-secret random salt)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;

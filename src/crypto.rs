//! # Cryptography module
//!
//! Thin adapters over the RustCrypto primitives used by secret key
//! protection: hashes, CFB mode ciphers and the legacy checksums.

pub mod checksum;
pub mod hash;
pub mod public_key;
pub mod sym;

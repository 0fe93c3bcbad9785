//! # pgpkeys
//!
//! Reading, unlocking and writing OpenPGP (RFC 4880) secret key packets.
//!
//! The crate covers the pieces needed to get from the octets of a key packet
//! to its cleartext key material and back:
//!
//! - multiprecision integers ([`types::Mpi`])
//! - string-to-key derivation ([`types::StringToKey`])
//! - old and new format packet headers ([`packet::PacketHeader`])
//! - locked and unlocked secret keys ([`packet::SecretKey`])
//!
//! ```rust
//! use pgpkeys::packet::{Packet, PacketParser, PacketTrait};
//! use pgpkeys::types::Password;
//! # fn run(input: &[u8]) -> pgpkeys::errors::Result<()> {
//!
//! for packet in PacketParser::new(input) {
//!     if let Packet::SecretKey(mut key) = packet? {
//!         key.decrypt(&Password::from("correcthorse"))?;
//!         let unprotected = key.to_bytes_with_header()?;
//!         # let _ = unprotected;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::style,
    clippy::perf,
    clippy::complexity,
    clippy::correctness,
    rust_2018_idioms
)]
#![allow(clippy::missing_const_for_fn, clippy::use_self)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

#[macro_use]
pub mod errors;

pub mod crypto;
pub mod packet;
pub mod parsing;
pub mod ser;
pub mod types;

mod util;

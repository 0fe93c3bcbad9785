//! # Packet module
//!
//! Framing of packets, and the key packets built on top of it.
//!
//! ```rust
//! use pgpkeys::packet::{Packet, PacketParser};
//!
//! // an old format user id packet
//! let input = [0xB4, 0x02, b'M', b'e'];
//! for packet in PacketParser::new(&input) {
//!     let packet = packet.expect("valid packet");
//!     println!("{:?}", packet.tag());
//! }
//! ```

mod header;
mod key;
mod many;
mod packet_sum;
mod packet_trait;

pub use self::{header::PacketHeader, key::*, many::*, packet_sum::*, packet_trait::PacketTrait};

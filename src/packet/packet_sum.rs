use std::io;

use log::debug;

use crate::errors::Result;
use crate::packet::{PacketTrait, PublicKey, PublicSubkey, SecretKey, SecretSubkey};
use crate::ser::Serialize;
use crate::types::Tag;

/// A single packet, with the key packets parsed into their own types.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-4>
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Packet {
    PublicKey(PublicKey),
    PublicSubkey(PublicSubkey),
    SecretKey(SecretKey),
    SecretSubkey(SecretSubkey),
    /// Any other packet, kept as is.
    Raw(RawPacket),
}

/// A packet this crate does not interpret.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct RawPacket {
    tag: Tag,
    #[debug("{}", hex::encode(body))]
    body: Vec<u8>,
}

impl RawPacket {
    pub fn new(tag: Tag, body: Vec<u8>) -> Self {
        Self { tag, body }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Serialize for RawPacket {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.body)?;
        Ok(())
    }

    fn write_len(&self) -> usize {
        self.body.len()
    }
}

impl PacketTrait for RawPacket {
    fn tag(&self) -> Tag {
        self.tag
    }
}

impl Packet {
    /// Parses the body of a packet with the given tag.
    pub fn from_bytes(tag: Tag, body: &[u8]) -> Result<Self> {
        debug!("parsing {:?} packet body, {} octets", tag, body.len());

        let packet = match tag {
            Tag::PublicKey => PublicKey::from_slice(body)?.into(),
            Tag::PublicSubkey => PublicSubkey::from_slice(body)?.into(),
            Tag::SecretKey => SecretKey::from_slice(body)?.into(),
            Tag::SecretSubkey => SecretSubkey::from_slice(body)?.into(),
            _ => RawPacket::new(tag, body.to_vec()).into(),
        };

        Ok(packet)
    }

    pub fn tag(&self) -> Tag {
        match self {
            Self::PublicKey(p) => p.tag(),
            Self::PublicSubkey(p) => p.tag(),
            Self::SecretKey(p) => p.tag(),
            Self::SecretSubkey(p) => p.tag(),
            Self::Raw(p) => p.tag(),
        }
    }
}

macro_rules! impl_from_packet {
    ($($variant:ident => $typ:ty),+ $(,)?) => {
        $(
            impl From<$typ> for Packet {
                fn from(other: $typ) -> Packet {
                    Packet::$variant(other)
                }
            }
        )+
    };
}

impl_from_packet!(
    PublicKey => PublicKey,
    PublicSubkey => PublicSubkey,
    SecretKey => SecretKey,
    SecretSubkey => SecretSubkey,
    Raw => RawPacket,
);

/// Writes header and body. Every packet is written with a new format header.
impl Serialize for Packet {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Self::PublicKey(p) => p.to_writer_with_header(writer),
            Self::PublicSubkey(p) => p.to_writer_with_header(writer),
            Self::SecretKey(p) => p.to_writer_with_header(writer),
            Self::SecretSubkey(p) => p.to_writer_with_header(writer),
            Self::Raw(p) => p.to_writer_with_header(writer),
        }
    }

    fn write_len(&self) -> usize {
        match self {
            Self::PublicKey(p) => p.write_len_with_header(),
            Self::PublicSubkey(p) => p.write_len_with_header(),
            Self::SecretKey(p) => p.write_len_with_header(),
            Self::SecretSubkey(p) => p.write_len_with_header(),
            Self::Raw(p) => p.write_len_with_header(),
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn raw_packet() {
        // user id "Me"
        let packet = Packet::from_bytes(Tag::UserId, b"Me").unwrap();
        assert_eq!(packet.tag(), Tag::UserId);
        assert_eq!(packet.to_bytes().unwrap(), hex!("cd 02 4d65").to_vec());
        assert_eq!(packet.write_len(), 4);
    }

    #[test]
    fn key_packet() {
        let body = hex!("04 5c2aad80 01 0008 c5 0002 03");
        let packet = Packet::from_bytes(Tag::PublicSubkey, &body).unwrap();
        assert!(matches!(packet, Packet::PublicSubkey(_)));
        assert_eq!(
            packet.to_bytes().unwrap(),
            [&[0xCE, 11][..], &body[..]].concat()
        );

        assert!(Packet::from_bytes(Tag::PublicKey, &body[..5]).is_err());
    }
}

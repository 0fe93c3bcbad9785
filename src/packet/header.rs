use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;
use log::debug;

use crate::errors::Result;
use crate::parsing::BufParsing;
use crate::ser::Serialize;
use crate::types::{PacketHeaderVersion, PacketLength, Tag};

/// Represents a packet header with a fixed size body.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-4.2>
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PacketHeader {
    Old {
        tag: Tag,
        /// Encoded length type, 0 to 2.
        length_type: u8,
        length: usize,
    },
    New {
        tag: Tag,
        length: usize,
    },
}

impl PacketHeader {
    /// Parse a single packet header from the given buffer.
    ///
    /// Partial and indeterminate lengths fail with `UnsupportedFraming`.
    pub fn from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let header = i.read_u8()?;

        let first_two_bits = header & 0b1100_0000;
        match first_two_bits {
            0b1100_0000 => {
                // new starts with 0b11
                let tag = Tag::from(header & 0b0011_1111);
                let length = PacketLength::try_from_buf(&mut i)?.fixed()?;
                Ok(PacketHeader::New { tag, length })
            }
            0b1000_0000 => {
                // old starts with 0b10
                let tag = Tag::from((header >> 2) & 0b0000_1111);
                let length_type = header & 0b0000_0011;
                let length = match length_type {
                    // One-Octet Lengths
                    0 => PacketLength::Fixed(i.read_u8()?.into()),
                    // Two-Octet Lengths
                    1 => PacketLength::Fixed(i.read_be_u16()?.into()),
                    // Four-Octet Lengths
                    2 => PacketLength::Fixed(i.read_be_u32()?.try_into()?),
                    _ => PacketLength::Indeterminate,
                };
                Ok(PacketHeader::Old {
                    tag,
                    length_type,
                    length: length.fixed()?,
                })
            }
            _ => {
                bail!("unknown packet header version {:b}", header);
            }
        }
    }

    /// Parses the header at `offset`, returning the header and the number of octets it used.
    pub fn parse(input: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut i = input.get(offset..).unwrap_or_default();
        let start = i.remaining();
        let header = Self::from_buf(&mut i)?;
        Ok((header, start - i.remaining()))
    }

    /// Creates a `New` style packet header.
    pub fn new_fixed(tag: Tag, length: usize) -> Self {
        PacketHeader::New { tag, length }
    }

    /// Returns the packet header version.
    pub const fn version(&self) -> PacketHeaderVersion {
        match self {
            Self::Old { .. } => PacketHeaderVersion::Old,
            Self::New { .. } => PacketHeaderVersion::New,
        }
    }

    /// Returns the body length.
    pub fn packet_length(&self) -> usize {
        match self {
            Self::Old { length, .. } | Self::New { length, .. } => *length,
        }
    }

    /// Returns the packet tag.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Old { tag, .. } | Self::New { tag, .. } => *tag,
        }
    }
}

impl Serialize for PacketHeader {
    fn to_writer<W: std::io::Write>(&self, writer: &mut W) -> Result<()> {
        debug!("writing packet header {:?}", self);

        match self {
            Self::New { tag, length } => {
                writer.write_u8(tag.encode())?;
                PacketLength::write_fixed(writer, *length)?;
            }
            Self::Old {
                tag,
                length_type,
                length,
            } => {
                writer.write_u8(0b1000_0000 | (u8::from(*tag) << 2) | length_type)?;
                match length_type {
                    0 => writer.write_u8((*length).try_into()?)?,
                    1 => writer.write_u16::<BigEndian>((*length).try_into()?)?,
                    _ => writer.write_u32::<BigEndian>((*length).try_into()?)?,
                }
            }
        }

        Ok(())
    }

    fn write_len(&self) -> usize {
        match self {
            Self::New { length, .. } => 1 + PacketLength::fixed_encoding_len(*length),
            Self::Old { length_type, .. } => match length_type {
                0 => 2,
                1 => 3,
                _ => 5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_new_header() {
        let (header, len) = PacketHeader::parse(&hex!("c5c06e"), 0).unwrap();
        assert_eq!(len, 3);
        assert_eq!(header.version(), PacketHeaderVersion::New);
        assert_eq!(header.tag(), Tag::SecretKey);
        assert_eq!(header.packet_length(), 302);
        assert_eq!(header.to_bytes().unwrap(), hex!("c5c06e").to_vec());
    }

    #[test]
    fn test_old_header() {
        // ctb=95 tag=5 hlen=3 plen=958
        let raw = hex!("9503be");
        let (header, len) = PacketHeader::parse(&raw, 0).unwrap();
        assert_eq!(len, 3);
        assert_eq!(header.version(), PacketHeaderVersion::Old);
        assert_eq!(header.tag(), Tag::SecretKey);
        assert_eq!(header.packet_length(), 958);
        assert_eq!(header.to_bytes().unwrap(), raw.to_vec());

        // the same body always gets a new style header when built
        let built = PacketHeader::new_fixed(header.tag(), header.packet_length());
        assert_eq!(built.to_bytes().unwrap(), hex!("c5c2fe").to_vec());
    }

    #[test]
    fn test_offset() {
        let raw = hex!("0000 b4 0d");
        let (header, len) = PacketHeader::parse(&raw, 2).unwrap();
        assert_eq!(len, 2);
        assert_eq!(header.tag(), Tag::UserId);
        assert_eq!(header.packet_length(), 13);

        assert!(matches!(
            PacketHeader::parse(&raw, 4),
            Err(Error::TruncatedInput { .. })
        ));
        assert!(matches!(
            PacketHeader::parse(&raw, 10),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_streamed_framing() {
        // new format, partial body
        assert!(matches!(
            PacketHeader::parse(&hex!("cbe1"), 0),
            Err(Error::UnsupportedFraming { .. })
        ));
        // old format, indeterminate length
        assert!(matches!(
            PacketHeader::parse(&hex!("af"), 0),
            Err(Error::UnsupportedFraming { .. })
        ));
    }

    #[test]
    fn test_invalid_ctb() {
        assert!(matches!(
            PacketHeader::parse(&hex!("05 01"), 0),
            Err(Error::Message { .. })
        ));
    }

    impl Arbitrary for PacketHeader {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                (any::<Tag>(), 0usize..=u32::MAX as usize)
                    .prop_map(|(tag, length)| PacketHeader::New { tag, length }),
                (1u8..16, 0u8..3, any::<u32>()).prop_map(|(tag, length_type, length)| {
                    let length = match length_type {
                        0 => length as u8 as usize,
                        1 => length as u16 as usize,
                        _ => length as usize,
                    };
                    PacketHeader::Old {
                        tag: Tag::from(tag),
                        length_type,
                        length,
                    }
                }),
            ]
            .boxed()
        }
    }

    proptest! {
        #[test]
        fn write_len(header: PacketHeader) {
            let buf = header.to_bytes().unwrap();
            prop_assert_eq!(buf.len(), header.write_len());
        }

        #[test]
        fn packet_roundtrip(header: PacketHeader) {
            let buf = header.to_bytes().unwrap();
            let (new_header, len) = PacketHeader::parse(&buf, 0).unwrap();
            prop_assert_eq!(len, buf.len());
            prop_assert_eq!(header, new_header);
        }
    }
}

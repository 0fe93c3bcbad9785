use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::errors::{Error, Result};
use crate::parsing::BufParsing;

/// Represents the packet length.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PacketLength {
    Fixed(usize),
    /// Old format length type 3, the packet extends to the end of the input.
    Indeterminate,
    /// New format partial body length, only the first chunk is known.
    Partial(u32),
}

impl PacketLength {
    /// Reads a new format length.
    /// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-4.2.2>
    pub fn try_from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let olen = i.read_u8()?;
        let len = match olen {
            // One-Octet Lengths
            0..=191 => PacketLength::Fixed(olen.into()),
            // Two-Octet Lengths
            192..=223 => {
                let a = i.read_u8()?;
                let l = ((olen as usize - 192) << 8) + 192 + a as usize;
                PacketLength::Fixed(l)
            }
            // Partial Body Lengths
            224..=254 => PacketLength::Partial(1 << (olen & 0x1F)),
            // Five-Octet Lengths
            255 => {
                let len = i.read_be_u32()?;
                PacketLength::Fixed(len.try_into()?)
            }
        };
        Ok(len)
    }

    /// Returns the length of a fixed size body.
    ///
    /// Streamed bodies (partial or indeterminate lengths) are not supported.
    pub fn fixed(self) -> Result<usize> {
        match self {
            PacketLength::Fixed(len) => Ok(len),
            PacketLength::Indeterminate => Err(Error::UnsupportedFraming {
                message: "indeterminate packet length".into(),
            }),
            PacketLength::Partial(len) => Err(Error::UnsupportedFraming {
                message: format!("partial body length ({len} octets)"),
            }),
        }
    }

    /// Writes `len` as a new format fixed length.
    pub fn write_fixed<W: io::Write>(writer: &mut W, len: usize) -> Result<()> {
        if len < 192 {
            writer.write_u8(len as u8)?;
        } else if len < 8384 {
            writer.write_u8((((len - 192) >> 8) + 192) as u8)?;
            writer.write_u8(((len - 192) & 0xFF) as u8)?;
        } else {
            writer.write_u8(255)?;
            writer.write_u32::<BigEndian>(len.try_into()?)?;
        }
        Ok(())
    }

    /// Returns how many bytes encoding the given length as new format fixed length would need.
    pub fn fixed_encoding_len(len: usize) -> usize {
        if len < 192 {
            1
        } else if len < 8384 {
            2
        } else {
            1 + 4
        }
    }
}

/// Packet Tag
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-4.3>
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(u8)]
#[non_exhaustive]
pub enum Tag {
    /// Public-Key Encrypted Session Key Packet
    PublicKeyEncryptedSessionKey = 1,
    /// Signature Packet
    Signature = 2,
    /// Symmetric-Key Encrypted Session Key Packet
    SymKeyEncryptedSessionKey = 3,
    /// One-Pass Signature Packet
    OnePassSignature = 4,
    /// Secret-Key Packet
    SecretKey = 5,
    /// Public-Key Packet
    PublicKey = 6,
    /// Secret-Subkey Packet
    SecretSubkey = 7,
    /// Compressed Data Packet
    CompressedData = 8,
    /// Symmetrically Encrypted Data Packet
    SymEncryptedData = 9,
    /// Marker Packet
    Marker = 10,
    /// Literal Data Packet
    LiteralData = 11,
    /// Trust Packet
    Trust = 12,
    /// User ID Packet
    UserId = 13,
    /// Public-Subkey Packet
    PublicSubkey = 14,
    /// User Attribute Packet
    UserAttribute = 17,
    /// Sym. Encrypted and Integrity Protected Data Packet
    SymEncryptedProtectedData = 18,
    /// Modification Detection Code Packet
    ModDetectionCode = 19,

    #[num_enum(catch_all)]
    Other(#[cfg_attr(test, proptest(strategy = "20u8..64"))] u8),
}

impl Tag {
    /// Tag encoded in the first octet of a new format header.
    pub fn encode(self) -> u8 {
        0b1100_0000 | u8::from(self)
    }

    pub fn is_key(self) -> bool {
        matches!(
            self,
            Tag::SecretKey | Tag::PublicKey | Tag::SecretSubkey | Tag::PublicSubkey
        )
    }
}

/// The version of the packet format.
///
/// There are two packet formats
/// (see <https://www.rfc-editor.org/rfc/rfc4880.html#section-4.2>):
///
/// 1) the old format, used by PGP 2.6.x and
///
/// 2) the new format, which is always used when writing.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum PacketHeaderVersion {
    /// Old Packet Format
    Old,
    /// New Packet Format
    #[default]
    New,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum KeyVersion {
    V2 = 2,
    V3 = 3,
    V4 = 4,
    V5 = 5,
    V6 = 6,

    #[num_enum(catch_all)]
    Other(u8),
}

impl KeyVersion {
    /// Only version 4 keys are handled.
    pub fn ensure_supported(self) -> Result<()> {
        match self {
            KeyVersion::V4 => Ok(()),
            v => Err(Error::UnsupportedVersion { version: v.into() }),
        }
    }
}

impl Default for KeyVersion {
    fn default() -> Self {
        Self::V4
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_lengths() {
        for (raw, len) in [
            (&[0x64][..], 100),
            (&[0xc5, 0xfb][..], 1723),
            (&[0xff, 0x00, 0x01, 0x86, 0xa0][..], 100_000),
        ] {
            assert_eq!(
                PacketLength::try_from_buf(raw).unwrap(),
                PacketLength::Fixed(len)
            );
            let mut buf = Vec::new();
            PacketLength::write_fixed(&mut buf, len).unwrap();
            assert_eq!(&buf, raw);
            assert_eq!(PacketLength::fixed_encoding_len(len), raw.len());
        }
    }

    #[test]
    fn test_streamed_lengths() {
        let len = PacketLength::try_from_buf(&[0xef][..]).unwrap();
        assert_eq!(len, PacketLength::Partial(32768));
        assert!(matches!(len.fixed(), Err(Error::UnsupportedFraming { .. })));
        assert!(matches!(
            PacketLength::Indeterminate.fixed(),
            Err(Error::UnsupportedFraming { .. })
        ));
        assert!(matches!(
            PacketLength::try_from_buf(&[0xc5][..]),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_key_version() {
        assert!(KeyVersion::from(4).ensure_supported().is_ok());
        for v in [2, 3, 5, 6, 42] {
            assert!(matches!(
                KeyVersion::from(v).ensure_supported(),
                Err(Error::UnsupportedVersion { version }) if version == v
            ));
        }
    }

    proptest! {
        #[test]
        fn fixed_length_roundtrip(len in 0usize..=u32::MAX as usize) {
            let mut buf = Vec::new();
            PacketLength::write_fixed(&mut buf, len).unwrap();
            prop_assert_eq!(buf.len(), PacketLength::fixed_encoding_len(len));
            prop_assert_eq!(PacketLength::try_from_buf(&buf[..]).unwrap(), PacketLength::Fixed(len));
        }

        #[test]
        fn tag_roundtrip(tag: Tag) {
            prop_assert_eq!(Tag::from(u8::from(tag)), tag);
        }
    }
}

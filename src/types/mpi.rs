use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;
use log::debug;
use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Error, Result};
use crate::parsing::BufParsing;
use crate::ser::Serialize;

/// Number of bits we accept when reading or writing MPIs.
/// The value is the same as gnupgs.
pub const MAX_EXTERN_MPI_BITS: u16 = 16384;

/// Represents an owned MPI value.
/// The inner value is ready to be serialized, without the need to strip leading zeros.
///
/// The backing buffer is wiped on drop, as MPIs carry secret key material.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-3.2>
#[derive(Default, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, derive_more::Debug)]
pub struct Mpi(#[debug("{}", hex::encode(_0))] Vec<u8>);

impl Mpi {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses the given buffer as an MPI.
    ///
    /// The buffer is expected to be length-prefixed.
    pub fn from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let len_bits = i.read_be_u16()?;

        if len_bits > MAX_EXTERN_MPI_BITS {
            bail!("mpi too long: {} bits", len_bits);
        }

        let len_bytes = (usize::from(len_bits) + 7) >> 3;
        i.ensure_remaining(len_bytes, "mpi")?;

        let mut n = vec![0u8; len_bytes];
        i.copy_to_slice(&mut n);
        let mpi = Mpi::from_slice(&n);
        n.zeroize();

        if mpi.bit_len() != usize::from(len_bits) {
            debug!(
                "non-canonical mpi: {} bits declared, {} used, rewritten on export",
                len_bits,
                mpi.bit_len()
            );
        }

        Ok(mpi)
    }

    /// Decodes an MPI at `offset` in `input`.
    ///
    /// Returns the MPI and the number of octets consumed, including the
    /// two octet bit count.
    pub fn decode(input: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut i = input.get(offset..).ok_or(Error::TruncatedInput {
            context: "mpi offset",
            needed: offset,
            remaining: input.len(),
        })?;
        let before = i.remaining();
        let mpi = Self::from_buf(&mut i)?;

        Ok((mpi, before - i.remaining()))
    }

    /// Represent the data in `raw` as an Mpi.
    /// Note that `raw` is not expected to be length-prefixed!
    ///
    /// Strips leading zeros.
    pub fn from_slice(raw: &[u8]) -> Self {
        Mpi(strip_leading_zeros(raw).to_vec())
    }

    /// Number of significant bits, as written in the length prefix.
    pub fn bit_len(&self) -> usize {
        bit_size(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Returns the bit length of a given slice.
#[inline]
fn bit_size(val: &[u8]) -> usize {
    if val.is_empty() {
        0
    } else {
        (val.len() * 8) - val[0].leading_zeros() as usize
    }
}

#[inline]
fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .position(|b| b != &0)
        .map_or(&[], |offset| &bytes[offset..])
}

impl AsRef<[u8]> for Mpi {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Serialize for Mpi {
    fn to_writer<W: io::Write>(&self, w: &mut W) -> Result<()> {
        let bytes = &self.0;
        let size = bit_size(bytes);
        w.write_u16::<BigEndian>(size.try_into()?)?;
        w.write_all(bytes)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        2 + self.0.len()
    }
}

impl From<BigUint> for Mpi {
    fn from(other: BigUint) -> Self {
        Mpi::from(&other)
    }
}

impl From<&BigUint> for Mpi {
    fn from(other: &BigUint) -> Self {
        Mpi::from_slice(&other.to_bytes_be())
    }
}

impl From<&Mpi> for BigUint {
    fn from(other: &Mpi) -> Self {
        BigUint::from_bytes_be(other.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    impl Arbitrary for Mpi {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            proptest::collection::vec(any::<u8>(), 0..1024)
                .prop_map(|v| Mpi::from_slice(&v))
                .boxed()
        }
    }

    #[test]
    fn test_mpi() {
        // Decode the number `511` (`0x1FF` in hex).
        assert_eq!(
            Mpi::from_buf(&mut &[0x00, 0x09, 0x01, 0xFF][..]).unwrap(),
            Mpi::from_slice(&[0x01, 0xFF][..])
        );

        // Decode the number `2^255 + 7`.
        assert_eq!(
            Mpi::from_buf(
                &mut &[
                    0x01, 0, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                    0, 0, 0, 0, 0, 0, 0, 0, 0, 0x07
                ][..]
            )
            .unwrap(),
            Mpi::from_slice(
                &[
                    0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                    0, 0, 0, 0, 0, 0, 0x07
                ][..]
            )
        );
    }

    #[test]
    fn test_decode_offset() {
        let data = [0xAA, 0xBB, 0x00, 0x09, 0x01, 0xFF, 0xCC];
        let (mpi, consumed) = Mpi::decode(&data, 2).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(mpi.as_bytes(), &[0x01, 0xFF]);
        assert_eq!(mpi.bit_len(), 9);

        assert!(matches!(
            Mpi::decode(&data, 20),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_truncated() {
        // declares 16 bits, but only one octet follows
        let err = Mpi::from_buf(&mut &[0x00, 0x10, 0x01][..]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedInput {
                needed: 2,
                remaining: 1,
                ..
            }
        ));

        let err = Mpi::from_buf(&mut &[0x00][..]).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { .. }));
    }

    #[test]
    fn test_too_long() {
        let mut data = vec![0x40, 0x01];
        data.extend_from_slice(&[0xFF; 2049]);
        assert!(Mpi::from_buf(&mut &data[..]).is_err());
    }

    #[test]
    fn test_zero() {
        let zero = Mpi::from(BigUint::from(0u8));
        assert!(zero.is_empty());
        assert_eq!(zero.to_bytes().unwrap(), vec![0x00, 0x00]);
        let (back, consumed) = Mpi::decode(&[0x00, 0x00], 0).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(back, zero);
    }

    #[test]
    fn test_non_canonical_input() {
        let _ = pretty_env_logger::try_init();

        // leading zero octet on the wire is stripped
        let (mpi, consumed) = Mpi::decode(&[0x00, 0x10, 0x00, 0x05], 0).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(mpi.as_bytes(), &[0x05]);
        assert_eq!(mpi.to_bytes().unwrap(), vec![0x00, 0x03, 0x05]);

        // bit count larger than the leading octet needs
        let (mpi, consumed) = Mpi::decode(&[0x00, 0x08, 0x05], 0).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(mpi.bit_len(), 3);
        assert_eq!(mpi.to_bytes().unwrap(), vec![0x00, 0x03, 0x05]);
    }

    #[test]
    fn test_bignum_mpi() {
        let fixtures = [
            ("b4a71b058ac8aa1ddc453ab2663331c38f7645542815ac189a9af56d0e07a615469d3e08849650e03026d49259423cf00d089931cd700fd3a6e940bf83c81406e142a4b0a86f00738c7e1a9ff1b709f6bccc6cf900d0113a8e62e53d63be0a05105755b9efc6a4098c362c73fb422d40187d8e2382e88624d72caffceb13cec8fa0079c7d17883a46a1336471ab5be8cbb555c5d330d7fadb43318fa73b584edac312fa3302886bb5d04a05da3be2676c1fb94b3cf5c19d598659c3a7728ebab95f71721b662ac46aa9910726fe576d438f789c5ce2448f54546f254da814bcae1c35ee44b171e870ffa6403167a10e68573bdf155549274b431ff8e2418b627", "0800b4a71b058ac8aa1ddc453ab2663331c38f7645542815ac189a9af56d0e07a615469d3e08849650e03026d49259423cf00d089931cd700fd3a6e940bf83c81406e142a4b0a86f00738c7e1a9ff1b709f6bccc6cf900d0113a8e62e53d63be0a05105755b9efc6a4098c362c73fb422d40187d8e2382e88624d72caffceb13cec8fa0079c7d17883a46a1336471ab5be8cbb555c5d330d7fadb43318fa73b584edac312fa3302886bb5d04a05da3be2676c1fb94b3cf5c19d598659c3a7728ebab95f71721b662ac46aa9910726fe576d438f789c5ce2448f54546f254da814bcae1c35ee44b171e870ffa6403167a10e68573bdf155549274b431ff8e2418b627"),
            ("00e57192fa7bd6abd7d01331f0411eebff4651290af1329369cc3bb3b8ccbd7ba6e352400c3f64f637967e24524921ee04f1e0a79168781f0bec9029e34c8a1fb1c328a4b8d74c31429616a6ff4707bb56b71ab66643243087c8ff0d0c4883b3473c56deece9a83dbd06eef09fac3558003ae45f8898b8a9490aa79672eebdd7d985d051d62698f2da7eee33ba740e30fc5a93c3f16ca1490dfd62b84ba016c9da7c087a28a4e97d8af79c6b638bc22f20a8b5953bb83caa3dddaaf1d0dc15a3f7ed47870174af74e5308b856138771a10019fe4374389eb89d2280776e33fa2dd3526cec35cd86a9cf6c94253fe00c4b8a87a36451745116456833bb1a237", "07f0e57192fa7bd6abd7d01331f0411eebff4651290af1329369cc3bb3b8ccbd7ba6e352400c3f64f637967e24524921ee04f1e0a79168781f0bec9029e34c8a1fb1c328a4b8d74c31429616a6ff4707bb56b71ab66643243087c8ff0d0c4883b3473c56deece9a83dbd06eef09fac3558003ae45f8898b8a9490aa79672eebdd7d985d051d62698f2da7eee33ba740e30fc5a93c3f16ca1490dfd62b84ba016c9da7c087a28a4e97d8af79c6b638bc22f20a8b5953bb83caa3dddaaf1d0dc15a3f7ed47870174af74e5308b856138771a10019fe4374389eb89d2280776e33fa2dd3526cec35cd86a9cf6c94253fe00c4b8a87a36451745116456833bb1a237"),
        ];

        for (raw, encoded) in fixtures.iter() {
            let n = hex::decode(raw).unwrap();

            let n_big = BigUint::from_bytes_be(&n);
            let n_mpi: Mpi = n_big.clone().into();
            let n_encoded = n_mpi.to_bytes().unwrap();

            assert_eq!(&n_encoded, &hex::decode(encoded).unwrap());

            let n_big2 = Mpi::from_buf(&mut &n_encoded[..]).unwrap();
            assert_eq!(n_big, BigUint::from(&n_big2));
        }
    }

    proptest! {
        #[test]
        fn mpi_write_len(m: Mpi) {
            let buf = m.to_bytes()?;
            prop_assert_eq!(m.write_len(), buf.len());
        }

        #[test]
        fn mpi_roundtrip(m: Mpi) {
            let buf = m.to_bytes()?;
            let (m_back, consumed) = Mpi::decode(&buf, 0)?;
            prop_assert_eq!(consumed, buf.len());
            prop_assert_eq!(m, m_back);
        }

        #[test]
        fn biguint_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..=1024)) {
            // up to 8192 bits
            let v = BigUint::from_bytes_be(&bytes);
            let encoded = Mpi::from(&v).to_bytes()?;
            if encoded.len() > 2 {
                prop_assert_ne!(encoded[2], 0, "leading zero octet");
            }
            prop_assert_eq!(
                usize::from(u16::from_be_bytes([encoded[0], encoded[1]])),
                v.bits()
            );

            let (decoded, _) = Mpi::decode(&encoded, 0)?;
            prop_assert_eq!(BigUint::from(&decoded), v);
        }
    }
}

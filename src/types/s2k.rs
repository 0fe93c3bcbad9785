use std::io;

use bytes::Buf;
use log::debug;
use num_enum::{FromPrimitive, IntoPrimitive};
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

use crate::crypto::hash::HashAlgorithm;
use crate::crypto::sym::{SymmetricKeyAlgorithm, MAX_KEY_SIZE};
use crate::errors::{Error, Result};
use crate::parsing::BufParsing;
use crate::ser::Serialize;

const EXPBIAS: u32 = 6;
const DEFAULT_ITER_SALTED_COUNT: u8 = 224;
const GNU_MAGIC: &[u8; 3] = b"GNU";
const MAX_GNU_SERIAL_LEN: usize = 16;

/// Available String-To-Key types
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-3.7.1>
#[derive(Debug, PartialEq, Eq, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum StringToKeyType {
    Simple = 0,
    Salted = 1,
    Reserved = 2,
    IteratedAndSalted = 3,
    Private100 = 100,
    /// GnuPG extensions
    Private101 = 101,
    Private102 = 102,
    Private103 = 103,
    Private104 = 104,
    Private105 = 105,
    Private106 = 106,
    Private107 = 107,
    Private108 = 108,
    Private109 = 109,
    Private110 = 110,

    #[num_enum(catch_all)]
    Other(u8),
}

/// Protection mode of the GnuPG S2K extension.
#[derive(Debug, PartialEq, Eq, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GnuExtension {
    /// No secret material is present at all.
    Dummy = 1,
    /// The secret material lives on a smartcard.
    DivertToCard = 2,

    #[num_enum(catch_all)]
    Other(u8),
}

/// A string-to-key descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringToKey {
    Simple {
        hash_alg: HashAlgorithm,
    },
    Salted {
        hash_alg: HashAlgorithm,
        salt: [u8; 8],
    },
    IteratedAndSalted {
        hash_alg: HashAlgorithm,
        salt: [u8; 8],
        /// Coded octet count.
        count: u8,
    },
    /// GnuPG private extension, which carries no usable derivation.
    Gnu {
        hash_alg: HashAlgorithm,
        mode: GnuExtension,
        serial: Option<Vec<u8>>,
    },
}

impl StringToKey {
    /// Iterated and salted S2K with a random salt.
    pub fn new_iterated<R: CryptoRng + Rng>(mut rng: R, hash_alg: HashAlgorithm, count: u8) -> Self {
        let mut salt = [0u8; 8];
        rng.fill(&mut salt);

        StringToKey::IteratedAndSalted {
            hash_alg,
            salt,
            count,
        }
    }

    /// Iterated and salted SHA-256 with a large count and random salt.
    pub fn new_default<R: CryptoRng + Rng>(rng: R) -> Self {
        Self::new_iterated(rng, HashAlgorithm::Sha256, DEFAULT_ITER_SALTED_COUNT)
    }

    /// Parses a descriptor from the front of `i`.
    pub fn try_from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let typ = StringToKeyType::from(i.read_u8()?);
        let s2k = match typ {
            StringToKeyType::Simple => {
                let hash_alg = i.read_u8().map(HashAlgorithm::from)?;
                StringToKey::Simple { hash_alg }
            }
            StringToKeyType::Salted => {
                let hash_alg = i.read_u8().map(HashAlgorithm::from)?;
                let salt = i.read_array::<8>()?;
                StringToKey::Salted { hash_alg, salt }
            }
            StringToKeyType::IteratedAndSalted => {
                let hash_alg = i.read_u8().map(HashAlgorithm::from)?;
                let salt = i.read_array::<8>()?;
                let count = i.read_u8()?;
                StringToKey::IteratedAndSalted {
                    hash_alg,
                    salt,
                    count,
                }
            }
            StringToKeyType::Private101 => {
                let hash_alg = i.read_u8().map(HashAlgorithm::from)?;
                let magic = i.read_array::<3>()?;
                if &magic != GNU_MAGIC {
                    return Err(Error::UnsupportedS2kSpecifier { typ: typ.into() });
                }
                let mode = GnuExtension::from(i.read_u8()?);
                let serial = match mode {
                    GnuExtension::DivertToCard => {
                        let len = usize::from(i.read_u8()?);
                        if len > MAX_GNU_SERIAL_LEN {
                            return Err(Error::UnsupportedS2kSpecifier { typ: typ.into() });
                        }
                        Some(i.read_take(len)?.to_vec())
                    }
                    GnuExtension::Dummy => None,
                    GnuExtension::Other(_) => {
                        return Err(Error::UnsupportedS2kSpecifier { typ: typ.into() })
                    }
                };
                StringToKey::Gnu {
                    hash_alg,
                    mode,
                    serial,
                }
            }
            // length of the remaining fields is unknown
            _ => return Err(Error::UnsupportedS2kSpecifier { typ: typ.into() }),
        };

        Ok(s2k)
    }

    pub fn typ(&self) -> StringToKeyType {
        match self {
            StringToKey::Simple { .. } => StringToKeyType::Simple,
            StringToKey::Salted { .. } => StringToKeyType::Salted,
            StringToKey::IteratedAndSalted { .. } => StringToKeyType::IteratedAndSalted,
            StringToKey::Gnu { .. } => StringToKeyType::Private101,
        }
    }

    pub fn hash_alg(&self) -> HashAlgorithm {
        match self {
            StringToKey::Simple { hash_alg }
            | StringToKey::Salted { hash_alg, .. }
            | StringToKey::IteratedAndSalted { hash_alg, .. }
            | StringToKey::Gnu { hash_alg, .. } => *hash_alg,
        }
    }

    pub fn salt(&self) -> Option<&[u8; 8]> {
        match self {
            StringToKey::Salted { salt, .. } | StringToKey::IteratedAndSalted { salt, .. } => {
                Some(salt)
            }
            _ => None,
        }
    }

    /// Converts a coded count into the count.
    /// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-3.7.1.3>
    pub fn count(&self) -> Option<usize> {
        match self {
            StringToKey::IteratedAndSalted { count, .. } => Some(decode_count(*count)),
            _ => None,
        }
    }

    /// True for descriptors that describe a key without (usable) secret material.
    pub fn is_gnu_extension(&self) -> bool {
        matches!(self, StringToKey::Gnu { .. })
    }

    /// Converts the given passphrase into a key of `key_size` octets.
    /// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-3.7.1>
    pub fn derive_key(&self, passphrase: &[u8], key_size: usize) -> Result<Zeroizing<Vec<u8>>> {
        if key_size > MAX_KEY_SIZE {
            return Err(Error::InvalidKeySize { size: key_size });
        }

        let (hash_alg, salt, count) = match self {
            StringToKey::Simple { hash_alg } => (*hash_alg, None, None),
            StringToKey::Salted { hash_alg, salt } => (*hash_alg, Some(&salt[..]), None),
            StringToKey::IteratedAndSalted {
                hash_alg,
                salt,
                count,
            } => (*hash_alg, Some(&salt[..]), Some(decode_count(*count))),
            StringToKey::Gnu { .. } => {
                return Err(Error::UnsupportedS2kSpecifier {
                    typ: self.typ().into(),
                });
            }
        };

        let Some(digest_size) = hash_alg.digest_size() else {
            unsupported_err!("s2k hash {:?}", hash_alg);
        };
        debug!(
            "s2k derive {:?} hash={} count={:?} key_size={}",
            self.typ(),
            hash_alg,
            count,
            key_size
        );

        let rounds = key_size.div_ceil(digest_size);
        let mut key = Zeroizing::new(Vec::with_capacity(rounds * digest_size));
        let zeros = [0u8; MAX_KEY_SIZE];

        for round in 0..rounds {
            let mut hasher = hash_alg.new_hasher()?;
            // each round is preloaded with one more zero than the previous one
            hasher.update(&zeros[..round]);

            match count {
                None => {
                    if let Some(salt) = salt {
                        hasher.update(salt);
                    }
                    hasher.update(passphrase);
                }
                Some(count) => {
                    let salt = salt.unwrap_or_default();
                    let data_len = salt.len() + passphrase.len();
                    // the whole salt and passphrase are hashed at least once
                    let mut remaining = count.max(data_len);

                    while remaining >= data_len && data_len > 0 {
                        hasher.update(salt);
                        hasher.update(passphrase);
                        remaining -= data_len;
                    }

                    if remaining > 0 {
                        if remaining <= salt.len() {
                            hasher.update(&salt[..remaining]);
                        } else {
                            hasher.update(salt);
                            hasher.update(&passphrase[..remaining - salt.len()]);
                        }
                    }
                }
            }

            let digest = Zeroizing::new(hasher.finalize());
            key.extend_from_slice(&digest);
        }

        key.truncate(key_size);

        Ok(key)
    }
}

#[inline]
fn decode_count(c: u8) -> usize {
    ((16u32 + u32::from(c & 15)) << (u32::from(c >> 4) + EXPBIAS)) as usize
}

impl Serialize for StringToKey {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[self.typ().into(), self.hash_alg().into()])?;

        match self {
            StringToKey::Simple { .. } => {}
            StringToKey::Salted { salt, .. } => {
                writer.write_all(salt)?;
            }
            StringToKey::IteratedAndSalted { salt, count, .. } => {
                writer.write_all(salt)?;
                writer.write_all(&[*count])?;
            }
            StringToKey::Gnu { mode, serial, .. } => {
                writer.write_all(GNU_MAGIC)?;
                writer.write_all(&[(*mode).into()])?;
                if let Some(serial) = serial {
                    writer.write_all(&[serial.len().try_into()?])?;
                    writer.write_all(serial)?;
                }
            }
        }

        Ok(())
    }

    fn write_len(&self) -> usize {
        2 + match self {
            StringToKey::Simple { .. } => 0,
            StringToKey::Salted { .. } => 8,
            StringToKey::IteratedAndSalted { .. } => 9,
            StringToKey::Gnu { serial, .. } => 4 + serial.as_ref().map(|s| 1 + s.len()).unwrap_or(0),
        }
    }
}

/// How the secret material of a key is protected: the S2K usage octet
/// together with the cipher, string-to-key descriptor and IV it implies.
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.5.3>
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub enum S2kParams {
    /// Usage octet 0.
    Unprotected,
    /// Usage octets 1..=253: the octet itself names the cipher, the key is
    /// derived with a simple MD5 S2K.
    LegacyCfb {
        sym_alg: SymmetricKeyAlgorithm,
        #[debug("{}", hex::encode(iv))]
        iv: Vec<u8>,
    },
    /// Usage octet 254, integrity protected by a SHA-1 hash.
    Cfb {
        sym_alg: SymmetricKeyAlgorithm,
        s2k: StringToKey,
        #[debug("{}", hex::encode(iv))]
        iv: Vec<u8>,
    },
    /// Usage octet 255, integrity protected by a two octet checksum.
    MalleableCfb {
        sym_alg: SymmetricKeyAlgorithm,
        s2k: StringToKey,
        #[debug("{}", hex::encode(iv))]
        iv: Vec<u8>,
    },
}

impl S2kParams {
    /// AES-256 with an iterated and salted SHA-256 S2K, protected by a SHA-1 hash.
    pub fn new_default<R: CryptoRng + Rng>(mut rng: R) -> Self {
        let sym_alg = SymmetricKeyAlgorithm::AES256;
        let mut iv = vec![0u8; sym_alg.block_size()];
        rng.fill(&mut iv[..]);

        S2kParams::Cfb {
            sym_alg,
            s2k: StringToKey::new_default(rng),
            iv,
        }
    }

    /// Parses the usage octet and the protection parameters that follow it.
    pub fn try_from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let usage = i.read_u8()?;

        let params = match usage {
            0 => S2kParams::Unprotected,
            254 | 255 => {
                let sym_alg = i.read_u8().map(SymmetricKeyAlgorithm::from)?;
                let s2k = StringToKey::try_from_buf(&mut i)?;
                // GnuPG stubs carry no IV
                let iv = if s2k.is_gnu_extension() {
                    Vec::new()
                } else {
                    let iv_len = sym_alg.iv_len()?;
                    i.read_take(iv_len)?.to_vec()
                };
                if usage == 254 {
                    S2kParams::Cfb { sym_alg, s2k, iv }
                } else {
                    S2kParams::MalleableCfb { sym_alg, s2k, iv }
                }
            }
            _ => {
                let sym_alg = SymmetricKeyAlgorithm::from(usage);
                let iv_len = sym_alg.iv_len()?;
                let iv = i.read_take(iv_len)?.to_vec();
                S2kParams::LegacyCfb { sym_alg, iv }
            }
        };

        Ok(params)
    }

    /// The S2K usage octet.
    pub fn usage(&self) -> u8 {
        match self {
            S2kParams::Unprotected => 0,
            S2kParams::LegacyCfb { sym_alg, .. } => (*sym_alg).into(),
            S2kParams::Cfb { .. } => 254,
            S2kParams::MalleableCfb { .. } => 255,
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, S2kParams::Unprotected)
    }

    pub fn sym_alg(&self) -> Option<SymmetricKeyAlgorithm> {
        match self {
            S2kParams::Unprotected => None,
            S2kParams::LegacyCfb { sym_alg, .. }
            | S2kParams::Cfb { sym_alg, .. }
            | S2kParams::MalleableCfb { sym_alg, .. } => Some(*sym_alg),
        }
    }

    pub fn iv(&self) -> Option<&[u8]> {
        match self {
            S2kParams::Unprotected => None,
            S2kParams::LegacyCfb { iv, .. }
            | S2kParams::Cfb { iv, .. }
            | S2kParams::MalleableCfb { iv, .. } => Some(iv),
        }
    }

    /// The descriptor used to derive the key. Legacy usage octets imply simple MD5.
    pub fn string_to_key(&self) -> Option<StringToKey> {
        match self {
            S2kParams::Unprotected => None,
            S2kParams::LegacyCfb { .. } => Some(StringToKey::Simple {
                hash_alg: HashAlgorithm::Md5,
            }),
            S2kParams::Cfb { s2k, .. } | S2kParams::MalleableCfb { s2k, .. } => Some(s2k.clone()),
        }
    }

    /// Ensures the parameters are usable for encrypting fresh material.
    pub(crate) fn check_encryptable(&self) -> Result<()> {
        let Some(sym_alg) = self.sym_alg() else {
            return Err(Error::inconsistent("cannot encrypt with unprotected s2k params"));
        };
        if let Some(iv) = self.iv() {
            ensure_eq!(iv.len(), sym_alg.iv_len()?, "invalid iv length");
        }
        sym_alg.checked_key_size()?;
        if let Some(s2k) = self.string_to_key() {
            if s2k.is_gnu_extension() {
                return Err(Error::UnsupportedS2kSpecifier {
                    typ: s2k.typ().into(),
                });
            }
        }

        Ok(())
    }
}

impl Serialize for S2kParams {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[self.usage()])?;

        match self {
            S2kParams::Unprotected => {}
            S2kParams::LegacyCfb { iv, .. } => {
                writer.write_all(iv)?;
            }
            S2kParams::Cfb { sym_alg, s2k, iv } | S2kParams::MalleableCfb { sym_alg, s2k, iv } => {
                writer.write_all(&[(*sym_alg).into()])?;
                s2k.to_writer(writer)?;
                writer.write_all(iv)?;
            }
        }

        Ok(())
    }

    fn write_len(&self) -> usize {
        1 + match self {
            S2kParams::Unprotected => 0,
            S2kParams::LegacyCfb { iv, .. } => iv.len(),
            S2kParams::Cfb { s2k, iv, .. } | S2kParams::MalleableCfb { s2k, iv, .. } => {
                1 + s2k.write_len() + iv.len()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const SALT: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_count() {
        let s2k = |count| StringToKey::IteratedAndSalted {
            hash_alg: HashAlgorithm::Sha1,
            salt: SALT,
            count,
        };
        assert_eq!(s2k(0).count(), Some(1024));
        assert_eq!(s2k(96).count(), Some(65536));
        assert_eq!(s2k(224).count(), Some(16_777_216));
        assert_eq!(s2k(255).count(), Some(65_011_712));
        assert_eq!(
            StringToKey::Simple {
                hash_alg: HashAlgorithm::Sha1
            }
            .count(),
            None
        );
    }

    #[test]
    fn derive_simple_md5_two_rounds() {
        // 24 octets need a second MD5 round preloaded with one zero
        let s2k = StringToKey::Simple {
            hash_alg: HashAlgorithm::Md5,
        };
        let key = s2k.derive_key(b"hello", 24).unwrap();
        assert_eq!(
            &key[..],
            &hex!("5d41402abc4b2a76b9719d911017c5928c0a92934b5f5f69")[..]
        );
    }

    #[test]
    fn derive_salted_sha1() {
        let s2k = StringToKey::Salted {
            hash_alg: HashAlgorithm::Sha1,
            salt: SALT,
        };
        let key = s2k.derive_key(b"hello", 16).unwrap();
        assert_eq!(&key[..], &hex!("f4f7d67ef85a8ac07fedfd036702748a")[..]);
    }

    #[test]
    fn derive_iterated() {
        let s2k = StringToKey::IteratedAndSalted {
            hash_alg: HashAlgorithm::Sha256,
            salt: SALT,
            count: 0,
        };
        let key = s2k.derive_key(b"correcthorse", 16).unwrap();
        assert_eq!(&key[..], &hex!("f9b53d6a38e446b0f69633f4119a5862")[..]);

        let s2k = StringToKey::IteratedAndSalted {
            hash_alg: HashAlgorithm::Sha1,
            salt: SALT,
            count: 96,
        };
        let key = s2k.derive_key(b"correcthorse", 32).unwrap();
        assert_eq!(
            &key[..],
            &hex!("ec2f90317b0050d33aea5da1e73c8f68fed8443c74bbfdc8c1acc9c151f8aa8a")[..]
        );
    }

    #[test]
    fn derive_iterated_count_below_input() {
        // passphrase longer than the count: everything is hashed once
        let s2k = StringToKey::IteratedAndSalted {
            hash_alg: HashAlgorithm::Sha256,
            salt: SALT,
            count: 0,
        };
        let key = s2k.derive_key(&[b'a'; 1100], 16).unwrap();
        assert_eq!(&key[..], &hex!("77a0afd1be781b45db1b5db5063e7854")[..]);
    }

    #[test]
    fn derive_rejects() {
        let s2k = StringToKey::Simple {
            hash_alg: HashAlgorithm::Sha256,
        };
        assert!(matches!(
            s2k.derive_key(b"pw", 33),
            Err(Error::InvalidKeySize { size: 33 })
        ));

        let s2k = StringToKey::Simple {
            hash_alg: HashAlgorithm::Other(99),
        };
        assert!(matches!(
            s2k.derive_key(b"pw", 16),
            Err(Error::Unsupported { .. })
        ));

        let s2k = StringToKey::Gnu {
            hash_alg: HashAlgorithm::Sha1,
            mode: GnuExtension::Dummy,
            serial: None,
        };
        assert!(matches!(
            s2k.derive_key(b"pw", 16),
            Err(Error::UnsupportedS2kSpecifier { typ: 101 })
        ));
    }

    #[test]
    fn parse_iterated() {
        let raw = hex!("03 08 0102030405060708 60");
        let s2k = StringToKey::try_from_buf(&raw[..]).unwrap();
        assert_eq!(
            s2k,
            StringToKey::IteratedAndSalted {
                hash_alg: HashAlgorithm::Sha256,
                salt: SALT,
                count: 0x60,
            }
        );
        assert_eq!(s2k.to_bytes().unwrap(), raw.to_vec());
        assert_eq!(s2k.write_len(), raw.len());
    }

    #[test]
    fn parse_gnu() {
        let raw = hex!("65 02 474e55 01");
        let s2k = StringToKey::try_from_buf(&raw[..]).unwrap();
        assert_eq!(
            s2k,
            StringToKey::Gnu {
                hash_alg: HashAlgorithm::Sha1,
                mode: GnuExtension::Dummy,
                serial: None,
            }
        );
        assert_eq!(s2k.to_bytes().unwrap(), raw.to_vec());

        let raw = hex!("65 02 474e55 02 04 d2760001");
        let s2k = StringToKey::try_from_buf(&raw[..]).unwrap();
        assert!(s2k.is_gnu_extension());
        assert_eq!(s2k.to_bytes().unwrap(), raw.to_vec());
        assert_eq!(s2k.write_len(), raw.len());
    }

    #[test]
    fn parse_unsupported_specifiers() {
        for raw in [
            &hex!("02 08")[..],
            &hex!("64 08")[..],
            &hex!("65 02 414243 01")[..],
            &hex!("65 02 474e55 07")[..],
            &hex!("c8 08")[..],
        ] {
            let err = StringToKey::try_from_buf(raw).unwrap_err();
            assert!(
                matches!(err, Error::UnsupportedS2kSpecifier { .. }),
                "{}: {err:?}",
                hex::encode(raw)
            );
        }

        let err = StringToKey::try_from_buf(&hex!("01 08 0102")[..]).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { .. }));
    }

    #[test]
    fn parse_s2k_params() {
        let raw = hex!("fe 07 03 08 0102030405060708 00 000102030405060708090a0b0c0d0e0f ff");
        let mut i = &raw[..];
        let params = S2kParams::try_from_buf(&mut i).unwrap();
        assert_eq!(params.usage(), 254);
        assert_eq!(params.sym_alg(), Some(SymmetricKeyAlgorithm::AES128));
        assert_eq!(params.iv().unwrap().len(), 16);
        assert_eq!(params.write_len(), raw.len() - 1);
        // the ciphertext is left in the buffer
        assert_eq!(i, &[0xff]);

        let raw = hex!("03 0102030405060708");
        let params = S2kParams::try_from_buf(&raw[..]).unwrap();
        assert_eq!(
            params,
            S2kParams::LegacyCfb {
                sym_alg: SymmetricKeyAlgorithm::CAST5,
                iv: SALT.to_vec(),
            }
        );
        assert_eq!(
            params.string_to_key(),
            Some(StringToKey::Simple {
                hash_alg: HashAlgorithm::Md5
            })
        );
        assert_eq!(params.to_bytes().unwrap(), raw.to_vec());

        // a GnuPG stub has no IV
        let raw = hex!("ff 00 65 02 474e55 01");
        let params = S2kParams::try_from_buf(&raw[..]).unwrap();
        assert_eq!(params.iv(), Some(&[][..]));
        assert_eq!(params.to_bytes().unwrap(), raw.to_vec());
    }

    #[test]
    fn parse_s2k_params_bad_cipher() {
        let err = S2kParams::try_from_buf(&hex!("fe 64 00 02")[..]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCipher { .. }));

        let err = S2kParams::try_from_buf(&hex!("07 0001")[..]).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { .. }));
    }

    #[test]
    fn default_params() {
        let rng = ChaCha8Rng::seed_from_u64(7);
        let params = S2kParams::new_default(rng);
        assert_eq!(params.usage(), 254);
        assert_eq!(params.sym_alg(), Some(SymmetricKeyAlgorithm::AES256));
        let s2k = params.string_to_key().unwrap();
        assert_eq!(s2k.hash_alg(), HashAlgorithm::Sha256);
        assert_eq!(s2k.count(), Some(16_777_216));
        assert!(params.check_encryptable().is_ok());
        assert!(S2kParams::Unprotected.check_encryptable().is_err());
    }

    proptest! {
        #[test]
        fn derive_is_deterministic(
            pw in proptest::collection::vec(any::<u8>(), 0..64),
            salt: [u8; 8],
            key_size in 1usize..=32,
        ) {
            let s2k = StringToKey::IteratedAndSalted {
                hash_alg: HashAlgorithm::Sha1,
                salt,
                count: 0,
            };
            let a = s2k.derive_key(&pw, key_size).unwrap();
            let b = s2k.derive_key(&pw, key_size).unwrap();
            prop_assert_eq!(a.len(), key_size);
            prop_assert_eq!(&a[..], &b[..]);
        }

        #[test]
        fn derive_prefix_stable(pw in proptest::collection::vec(any::<u8>(), 0..32)) {
            // longer keys extend shorter ones
            let s2k = StringToKey::Salted {
                hash_alg: HashAlgorithm::Md5,
                salt: SALT,
            };
            let short = s2k.derive_key(&pw, 16).unwrap();
            let long = s2k.derive_key(&pw, 32).unwrap();
            prop_assert_eq!(&long[..16], &short[..]);
        }
    }
}

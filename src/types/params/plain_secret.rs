use std::io;

use log::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::checksum;
use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::{Error, Result};
use crate::ser::Serialize;
use crate::types::{EncryptedSecretParams, Mpi, PublicParams, S2kParams};
use crate::util::TeeWriter;

/// How the cleartext secret material is protected against corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityCheck {
    /// Two octet sum of all octets.
    Checksum,
    /// 20 octet SHA-1 hash, only used with S2K usage 254.
    Sha1,
}

impl IntegrityCheck {
    pub fn len(self) -> usize {
        match self {
            IntegrityCheck::Checksum => 2,
            IntegrityCheck::Sha1 => 20,
        }
    }

    /// Splits `data` into the protected material and the trailing check value,
    /// and verifies it.
    pub fn verify(self, data: &[u8]) -> Result<&[u8]> {
        let len = self.len();
        if data.len() < len {
            return Err(Error::TruncatedInput {
                context: "secret key integrity check",
                needed: len,
                remaining: data.len(),
            });
        }
        let (material, expected) = data.split_at(data.len() - len);

        match self {
            IntegrityCheck::Checksum => checksum::simple(expected, material)?,
            IntegrityCheck::Sha1 => checksum::sha1(expected, material)?,
        }

        Ok(material)
    }
}

/// Cleartext secret key material, laid out per public key algorithm.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, derive_more::Debug)]
pub enum PlainSecretParams {
    RSA {
        #[debug("..")]
        d: Mpi,
        #[debug("..")]
        p: Mpi,
        #[debug("..")]
        q: Mpi,
        #[debug("..")]
        u: Mpi,
    },
    DSA {
        #[debug("..")]
        x: Mpi,
    },
    Elgamal {
        #[debug("..")]
        x: Mpi,
    },
}

impl PlainSecretParams {
    /// Verifies the trailing integrity check of `data` and parses the
    /// algorithm specific MPIs in front of it.
    ///
    /// Nothing is parsed unless the check matches.
    pub fn try_from_slice(
        data: &[u8],
        alg: PublicKeyAlgorithm,
        public_params: &PublicParams,
        check: IntegrityCheck,
    ) -> Result<Self> {
        let material = check.verify(data)?;
        Self::try_from_slice_no_checksum(material, alg, public_params)
    }

    /// Skips the checksum, because it already has been checked.
    pub fn try_from_slice_no_checksum(
        mut i: &[u8],
        alg: PublicKeyAlgorithm,
        public_params: &PublicParams,
    ) -> Result<Self> {
        let params = match (alg, public_params) {
            (
                PublicKeyAlgorithm::RSA
                | PublicKeyAlgorithm::RSAEncrypt
                | PublicKeyAlgorithm::RSASign,
                PublicParams::RSA { .. },
            ) => {
                let d = Mpi::from_buf(&mut i)?;
                let p = Mpi::from_buf(&mut i)?;
                let q = Mpi::from_buf(&mut i)?;
                let u = Mpi::from_buf(&mut i)?;
                PlainSecretParams::RSA { d, p, q, u }
            }
            (PublicKeyAlgorithm::DSA, PublicParams::DSA { .. }) => {
                let x = Mpi::from_buf(&mut i)?;
                PlainSecretParams::DSA { x }
            }
            (
                PublicKeyAlgorithm::Elgamal | PublicKeyAlgorithm::ElgamalEncrypt,
                PublicParams::Elgamal { .. },
            ) => {
                let x = Mpi::from_buf(&mut i)?;
                PlainSecretParams::Elgamal { x }
            }
            _ => {
                return Err(Error::inconsistent(format!(
                    "secret key material for {alg:?} does not match the public parameters"
                )));
            }
        };
        ensure!(i.is_empty(), "failed to process full secret key material");

        Ok(params)
    }

    /// The MPIs in wire order, labeled with their conventional names.
    pub fn named_mpis(&self) -> Vec<(&'static str, &Mpi)> {
        match self {
            PlainSecretParams::RSA { d, p, q, u } => vec![("D", d), ("P", p), ("Q", q), ("U", u)],
            PlainSecretParams::DSA { x } | PlainSecretParams::Elgamal { x } => vec![("X", x)],
        }
    }

    pub fn checksum_simple(&self) -> [u8; 2] {
        let mut hasher = checksum::SimpleChecksum::default();
        self.to_writer_raw(&mut hasher).expect("known write target");
        hasher.finalize()
    }

    pub fn checksum_sha1(&self) -> [u8; 20] {
        let mut buf = Zeroizing::new(Vec::with_capacity(self.write_len_raw()));
        self.to_writer_raw(&mut *buf).expect("preallocated vector");
        checksum::calculate_sha1([&buf[..]])
    }

    /// Encrypts this material, producing the locked form described by `s2k_params`.
    pub fn encrypt(&self, passphrase: &[u8], s2k_params: S2kParams) -> Result<EncryptedSecretParams> {
        s2k_params.check_encryptable()?;

        let (Some(sym_alg), Some(iv), Some(s2k)) = (
            s2k_params.sym_alg(),
            s2k_params.iv(),
            s2k_params.string_to_key(),
        ) else {
            return Err(Error::inconsistent("cannot encrypt to unprotected"));
        };

        if s2k.hash_alg().is_weak() {
            warn!("encrypting secret key with weak s2k hash {}", s2k.hash_alg());
        }

        let key = s2k.derive_key(passphrase, sym_alg.checked_key_size()?)?;

        let mut data = Zeroizing::new(Vec::with_capacity(self.write_len_raw() + 20));
        self.to_writer_raw(&mut *data)?;
        match s2k_params {
            S2kParams::Cfb { .. } => data.extend_from_slice(&self.checksum_sha1()),
            _ => data.extend_from_slice(&self.checksum_simple()),
        }
        sym_alg.encrypt_with_iv_regular(&key, iv, &mut data)?;
        debug!("encrypted {} octets of secret key material", data.len());

        Ok(EncryptedSecretParams::new(data.to_vec(), s2k_params))
    }

    pub(crate) fn to_writer_raw<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        for (_, mpi) in self.named_mpis() {
            mpi.to_writer(writer)?;
        }

        Ok(())
    }

    fn write_len_raw(&self) -> usize {
        self.named_mpis()
            .into_iter()
            .map(|(_, mpi)| mpi.write_len())
            .sum()
    }
}

impl Serialize for PlainSecretParams {
    /// Writes the MPIs followed by their two octet checksum.
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        let mut hasher = checksum::SimpleChecksum::default();
        {
            let mut tee = TeeWriter::new(&mut hasher, writer);
            self.to_writer_raw(&mut tee)?;
        }
        hasher.to_writer(writer)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        self.write_len_raw() + 2
    }
}

use std::io;

use log::debug;
use zeroize::Zeroizing;

use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::{Error, Result};
use crate::ser::Serialize;
use crate::types::{IntegrityCheck, PlainSecretParams, PublicParams, S2kParams};

/// Secret key material that is still encrypted.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct EncryptedSecretParams {
    /// The encrypted data, including the encrypted checksum or hash.
    #[debug("{}", hex::encode(data))]
    data: Vec<u8>,
    s2k_params: S2kParams,
}

impl EncryptedSecretParams {
    pub fn new(data: Vec<u8>, s2k_params: S2kParams) -> Self {
        EncryptedSecretParams { data, s2k_params }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn s2k_params(&self) -> &S2kParams {
        &self.s2k_params
    }

    /// Which check protects the material once decrypted.
    pub fn integrity_check(&self) -> IntegrityCheck {
        match self.s2k_params {
            S2kParams::Cfb { .. } => IntegrityCheck::Sha1,
            _ => IntegrityCheck::Checksum,
        }
    }

    /// Decrypts and verifies the material, without modifying `self`.
    ///
    /// A wrong passphrase shows up as `IntegrityMismatch`.
    pub fn unlock(
        &self,
        passphrase: &[u8],
        alg: PublicKeyAlgorithm,
        public_params: &PublicParams,
    ) -> Result<PlainSecretParams> {
        let (Some(sym_alg), Some(iv), Some(s2k)) = (
            self.s2k_params.sym_alg(),
            self.s2k_params.iv(),
            self.s2k_params.string_to_key(),
        ) else {
            return Err(Error::inconsistent(
                "encrypted secret params without protection",
            ));
        };
        if s2k.is_gnu_extension() {
            return Err(Error::UnsupportedS2kSpecifier {
                typ: s2k.typ().into(),
            });
        }
        debug!(
            "unlocking secret key: usage {} {:?} {:?}",
            self.s2k_params.usage(),
            sym_alg,
            s2k.typ()
        );

        let key = s2k.derive_key(passphrase, sym_alg.checked_key_size()?)?;

        let mut plaintext = Zeroizing::new(self.data.clone());
        sym_alg.decrypt_with_iv_regular(&key, iv, &mut plaintext)?;

        let material = self.integrity_check().verify(&plaintext).map_err(|err| {
            debug!("failed to unlock secret key: {}", err);
            err
        })?;

        // A wrong passphrase passes the two octet checksum once in 65536 tries.
        PlainSecretParams::try_from_slice_no_checksum(material, alg, public_params).map_err(|err| {
            debug!("malformed secret key material after decryption: {}", err);
            Error::integrity("check password")
        })
    }
}

impl Serialize for EncryptedSecretParams {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        self.s2k_params.to_writer(writer)?;
        writer.write_all(&self.data)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        self.s2k_params.write_len() + self.data.len()
    }
}

use std::io;

use bytes::Buf;
use zeroize::Zeroizing;

use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::Result;
use crate::parsing::BufParsing;
use crate::ser::Serialize;
use crate::types::{
    EncryptedSecretParams, IntegrityCheck, PlainSecretParams, PublicParams, S2kParams,
};

/// The secret part of a key, either locked (encrypted) or unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretParams {
    Plain(PlainSecretParams),
    Encrypted(EncryptedSecretParams),
}

impl SecretParams {
    /// Parses the secret fields of a key, following the public fields.
    pub fn try_from_buf<B: Buf>(
        mut i: B,
        alg: PublicKeyAlgorithm,
        public_params: &PublicParams,
    ) -> Result<Self> {
        let s2k_params = S2kParams::try_from_buf(&mut i)?;

        if s2k_params.is_protected() {
            let data = i.rest().to_vec();
            return Ok(SecretParams::Encrypted(EncryptedSecretParams::new(
                data, s2k_params,
            )));
        }

        let mut data = Zeroizing::new(vec![0u8; i.remaining()]);
        i.copy_to_slice(&mut data);
        let params =
            PlainSecretParams::try_from_slice(&data, alg, public_params, IntegrityCheck::Checksum)?;

        Ok(SecretParams::Plain(params))
    }

    pub fn is_encrypted(&self) -> bool {
        match self {
            SecretParams::Plain(_) => false,
            SecretParams::Encrypted(_) => true,
        }
    }

    /// The S2K usage octet this state is written with.
    pub fn s2k_usage(&self) -> u8 {
        match self {
            SecretParams::Plain(_) => 0,
            SecretParams::Encrypted(k) => k.s2k_params().usage(),
        }
    }
}

impl Serialize for SecretParams {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            SecretParams::Plain(k) => {
                S2kParams::Unprotected.to_writer(writer)?;
                k.to_writer(writer)
            }
            SecretParams::Encrypted(k) => k.to_writer(writer),
        }
    }

    fn write_len(&self) -> usize {
        match self {
            SecretParams::Plain(k) => 1 + k.write_len(),
            SecretParams::Encrypted(k) => k.write_len(),
        }
    }
}

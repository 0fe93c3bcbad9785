use std::io;

use bytes::Buf;
use chrono::{DateTime, Utc};
use log::debug;
use rand::{CryptoRng, Rng};

use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::{Error, Result};
use crate::packet::{PacketTrait, PubKeyInner, PublicKey, PublicSubkey};
use crate::ser::Serialize;
use crate::types::{
    Fingerprint, KeyDetails, KeyVersion, Password, PlainSecretParams, PublicParams, S2kParams,
    SecretParams, Tag,
};

/// Secret-Key packet (tag 5).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SecretKey(SecretKeyInner<PublicKey>);

/// Secret-Subkey packet (tag 7).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SecretSubkey(SecretKeyInner<PublicSubkey>);

#[derive(Debug, PartialEq, Eq, Clone)]
struct SecretKeyInner<D> {
    details: D,
    secret_params: SecretParams,
}

impl<D: KeyDetails> SecretKeyInner<D> {
    fn decrypt(&mut self, password: &Password) -> Result<()> {
        let SecretParams::Encrypted(enc) = &self.secret_params else {
            debug!("secret key is already unlocked");
            return Ok(());
        };

        let plain = enc.unlock(
            &password.read(),
            self.details.algorithm(),
            self.details.public_params(),
        )?;
        self.secret_params = SecretParams::Plain(plain);

        Ok(())
    }

    fn unlock<G, T>(&self, password: &Password, work: G) -> Result<T>
    where
        G: FnOnce(&PlainSecretParams) -> Result<T>,
    {
        match self.secret_params {
            SecretParams::Plain(ref plain) => work(plain),
            SecretParams::Encrypted(ref enc) => {
                let plain = enc.unlock(
                    &password.read(),
                    self.details.algorithm(),
                    self.details.public_params(),
                )?;
                work(&plain)
            }
        }
    }

    fn set_password_with_s2k(&mut self, password: &Password, s2k_params: S2kParams) -> Result<()> {
        let SecretParams::Plain(plain) = &self.secret_params else {
            return Err(Error::inconsistent("secret key packet must be unlocked"));
        };

        let enc = plain.encrypt(&password.read(), s2k_params)?;
        self.secret_params = SecretParams::Encrypted(enc);

        Ok(())
    }
}

impl<D: Serialize> Serialize for SecretKeyInner<D> {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        // version and public part
        self.details.to_writer(writer)?;
        self.secret_params.to_writer(writer)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        self.details.write_len() + self.secret_params.write_len()
    }
}

macro_rules! impl_secret_key {
    ($name:ident, $details:ident, $tag:expr) => {
        impl $name {
            pub fn new(details: $details, secret_params: SecretParams) -> Self {
                Self(SecretKeyInner {
                    details,
                    secret_params,
                })
            }

            /// Parses the packet body.
            pub fn from_slice(input: &[u8]) -> Result<Self> {
                Self::try_from_buf(input)
            }

            pub fn try_from_buf<B: Buf>(mut i: B) -> Result<Self> {
                let details = PubKeyInner::try_from_buf(&mut i)?;
                let secret_params = SecretParams::try_from_buf(
                    &mut i,
                    details.algorithm(),
                    details.public_params(),
                )?;

                Ok(Self::new($details::from_inner(details), secret_params))
            }

            pub fn secret_params(&self) -> &SecretParams {
                &self.0.secret_params
            }

            /// Is the secret material still encrypted?
            pub fn is_locked(&self) -> bool {
                self.0.secret_params.is_encrypted()
            }

            pub fn public_key(&self) -> $details {
                self.0.details.clone()
            }

            /// Decrypts the secret material in place, so that it is written
            /// unprotected from now on.
            ///
            /// A key that is not locked is left unchanged. On failure the key
            /// stays locked.
            pub fn decrypt(&mut self, password: &Password) -> Result<()> {
                self.0.decrypt(password)
            }

            /// Runs `work` on the decrypted material, leaving the packet itself locked.
            pub fn unlock<G, T>(&self, password: &Password, work: G) -> Result<T>
            where
                G: FnOnce(&PlainSecretParams) -> Result<T>,
            {
                self.0.unlock(password, work)
            }

            /// Locks the secret material with `password`, using the default
            /// S2K parameters (AES-256, iterated and salted SHA-256).
            ///
            /// A locked key has to be decrypted first, to change its password.
            pub fn set_password<R: Rng + CryptoRng>(
                &mut self,
                rng: R,
                password: &Password,
            ) -> Result<()> {
                self.0
                    .set_password_with_s2k(password, S2kParams::new_default(rng))
            }

            /// Locks the secret material with `password` as described by `s2k_params`.
            pub fn set_password_with_s2k(
                &mut self,
                password: &Password,
                s2k_params: S2kParams,
            ) -> Result<()> {
                self.0.set_password_with_s2k(password, s2k_params)
            }
        }

        impl Serialize for $name {
            fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
                self.0.to_writer(writer)
            }

            fn write_len(&self) -> usize {
                self.0.write_len()
            }
        }

        impl PacketTrait for $name {
            fn tag(&self) -> Tag {
                $tag
            }
        }

        impl KeyDetails for $name {
            fn version(&self) -> KeyVersion {
                self.0.details.version()
            }

            fn fingerprint(&self) -> Fingerprint {
                self.0.details.fingerprint()
            }

            fn algorithm(&self) -> PublicKeyAlgorithm {
                self.0.details.algorithm()
            }

            fn created_at(&self) -> &DateTime<Utc> {
                self.0.details.created_at()
            }

            fn public_params(&self) -> &PublicParams {
                self.0.details.public_params()
            }
        }
    };
}

impl_secret_key!(SecretKey, PublicKey, Tag::SecretKey);
impl_secret_key!(SecretSubkey, PublicSubkey, Tag::SecretSubkey);

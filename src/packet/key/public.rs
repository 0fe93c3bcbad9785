use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;
use chrono::{DateTime, TimeZone, Utc};
use sha1_checked::{Digest, Sha1};

use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::Result;
use crate::packet::PacketTrait;
use crate::parsing::BufParsing;
use crate::ser::Serialize;
use crate::types::{Fingerprint, KeyDetails, KeyVersion, PublicParams, Tag};

/// Public-Key packet (tag 6).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PublicKey(PubKeyInner);

/// Public-Subkey packet (tag 14).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PublicSubkey(PubKeyInner);

/// The fields shared by all key packets.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PubKeyInner {
    version: KeyVersion,
    algorithm: PublicKeyAlgorithm,
    created_at: DateTime<Utc>,
    public_params: PublicParams,
}

impl PubKeyInner {
    pub fn new(
        version: KeyVersion,
        algorithm: PublicKeyAlgorithm,
        created_at: DateTime<Utc>,
        public_params: PublicParams,
    ) -> Result<Self> {
        version.ensure_supported()?;
        ensure!(
            u32::try_from(created_at.timestamp()).is_ok(),
            "creation time {} does not fit into 32 bits",
            created_at
        );
        ensure!(
            public_params.matches(algorithm),
            "public params do not match algorithm {:?}",
            algorithm
        );

        Ok(Self {
            version,
            algorithm,
            created_at,
            public_params,
        })
    }

    /// Parses the public fields, leaving anything after the public parameters in `i`.
    pub fn try_from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let version = KeyVersion::from(i.read_u8()?);
        version.ensure_supported()?;

        let created_at = i.read_be_u32()?;
        let created_at = Utc
            .timestamp_opt(created_at.into(), 0)
            .single()
            .ok_or_else(|| format_err!("invalid created_at timestamp {}", created_at))?;
        let algorithm = PublicKeyAlgorithm::from(i.read_u8()?);
        let public_params = PublicParams::try_from_buf(algorithm, &mut i)?;

        Self::new(version, algorithm, created_at, public_params)
    }
}

impl Serialize for PubKeyInner {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.version.into())?;
        writer.write_u32::<BigEndian>(self.created_at.timestamp().try_into()?)?;
        writer.write_u8(self.algorithm.into())?;
        self.public_params.to_writer(writer)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        1 + 4 + 1 + self.public_params.write_len()
    }
}

impl KeyDetails for PubKeyInner {
    fn version(&self) -> KeyVersion {
        self.version
    }

    /// SHA-1 over `0x99`, the two octet body length and the body.
    /// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-12.2>
    fn fingerprint(&self) -> Fingerprint {
        let mut packet = Vec::with_capacity(self.write_len());
        self.to_writer(&mut packet).expect("write to vec");

        let mut h = Sha1::new();
        h.update([0x99]);
        h.update((packet.len() as u16).to_be_bytes());
        h.update(&packet);
        let digest: [u8; 20] = h.finalize().into();

        Fingerprint::from(digest)
    }

    fn algorithm(&self) -> PublicKeyAlgorithm {
        self.algorithm
    }

    fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    fn public_params(&self) -> &PublicParams {
        &self.public_params
    }
}

macro_rules! impl_public_key {
    ($name:ident, $tag:expr) => {
        impl $name {
            pub fn new(
                version: KeyVersion,
                algorithm: PublicKeyAlgorithm,
                created_at: DateTime<Utc>,
                public_params: PublicParams,
            ) -> Result<Self> {
                PubKeyInner::new(version, algorithm, created_at, public_params).map(Self)
            }

            /// Parses the packet body.
            pub fn from_slice(mut input: &[u8]) -> Result<Self> {
                let inner = PubKeyInner::try_from_buf(&mut input)?;
                ensure!(input.is_empty(), "trailing data in {:?} packet", $tag);

                Ok(Self(inner))
            }

            pub(crate) fn from_inner(inner: PubKeyInner) -> Self {
                Self(inner)
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
                self.0.version()
            }

            fn fingerprint(&self) -> Fingerprint {
                self.0.fingerprint()
            }

            fn algorithm(&self) -> PublicKeyAlgorithm {
                self.0.algorithm()
            }

            fn created_at(&self) -> &DateTime<Utc> {
                self.0.created_at()
            }

            fn public_params(&self) -> &PublicParams {
                self.0.public_params()
            }
        }
    };
}

impl_public_key!(PublicKey, Tag::PublicKey);
impl_public_key!(PublicSubkey, Tag::PublicSubkey);

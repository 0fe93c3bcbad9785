use std::io;

use bytes::Buf;

use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::Result;
use crate::ser::Serialize;
use crate::types::Mpi;

/// Represent the public parameters for the different algorithms.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum PublicParams {
    RSA { n: Mpi, e: Mpi },
    DSA { p: Mpi, q: Mpi, g: Mpi, y: Mpi },
    Elgamal { p: Mpi, g: Mpi, y: Mpi },
}

impl PublicParams {
    /// Parses the public parameters of a key.
    pub fn try_from_buf<B: Buf>(typ: PublicKeyAlgorithm, mut i: B) -> Result<PublicParams> {
        match typ {
            PublicKeyAlgorithm::RSA
            | PublicKeyAlgorithm::RSAEncrypt
            | PublicKeyAlgorithm::RSASign => {
                let n = Mpi::from_buf(&mut i)?;
                let e = Mpi::from_buf(&mut i)?;
                Ok(PublicParams::RSA { n, e })
            }
            PublicKeyAlgorithm::DSA => {
                let p = Mpi::from_buf(&mut i)?;
                let q = Mpi::from_buf(&mut i)?;
                let g = Mpi::from_buf(&mut i)?;
                let y = Mpi::from_buf(&mut i)?;
                Ok(PublicParams::DSA { p, q, g, y })
            }
            PublicKeyAlgorithm::Elgamal | PublicKeyAlgorithm::ElgamalEncrypt => {
                // MPI of Elgamal prime p
                let p = Mpi::from_buf(&mut i)?;
                // MPI of Elgamal group generator g
                let g = Mpi::from_buf(&mut i)?;
                // MPI of Elgamal public key value y (= g**x mod p where x is secret)
                let y = Mpi::from_buf(&mut i)?;
                Ok(PublicParams::Elgamal { p, g, y })
            }
            _ => unsupported_err!("public key algorithm {:?}", typ),
        }
    }

    /// Does this parameter set belong to `alg`?
    pub fn matches(&self, alg: PublicKeyAlgorithm) -> bool {
        match self {
            PublicParams::RSA { .. } => alg.is_rsa(),
            PublicParams::DSA { .. } => alg == PublicKeyAlgorithm::DSA,
            PublicParams::Elgamal { .. } => alg.is_elgamal(),
        }
    }
}

impl Serialize for PublicParams {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            PublicParams::RSA { n, e } => {
                n.to_writer(writer)?;
                e.to_writer(writer)?;
            }
            PublicParams::DSA { p, q, g, y } => {
                p.to_writer(writer)?;
                q.to_writer(writer)?;
                g.to_writer(writer)?;
                y.to_writer(writer)?;
            }
            PublicParams::Elgamal { p, g, y } => {
                p.to_writer(writer)?;
                g.to_writer(writer)?;
                y.to_writer(writer)?;
            }
        }

        Ok(())
    }

    fn write_len(&self) -> usize {
        match self {
            PublicParams::RSA { n, e } => n.write_len() + e.write_len(),
            PublicParams::DSA { p, q, g, y } => {
                p.write_len() + q.write_len() + g.write_len() + y.write_len()
            }
            PublicParams::Elgamal { p, g, y } => p.write_len() + g.write_len() + y.write_len(),
        }
    }
}

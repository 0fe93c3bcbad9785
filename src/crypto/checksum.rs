use std::io;

use sha1::{Digest, Sha1};

use crate::errors::{Error, Result};
use crate::ser::Serialize;

/// Two octet checksum: sum of all octets mod 65536.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimpleChecksum(u16);

impl SimpleChecksum {
    pub fn update(&mut self, data: &[u8]) {
        for &b in data {
            self.0 = self.0.wrapping_add(u16::from(b));
        }
    }

    pub fn finalize(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl io::Write for SimpleChecksum {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Serialize for SimpleChecksum {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.finalize())?;
        Ok(())
    }

    fn write_len(&self) -> usize {
        2
    }
}

/// Calculates the two octet checksum of `data`.
#[inline]
pub fn calculate_simple(data: &[u8]) -> u16 {
    let mut hasher = SimpleChecksum::default();
    hasher.update(data);
    hasher.0
}

/// Verifies that `expected` (two octets, big endian) is the simple checksum of `data`.
#[inline]
pub fn simple(expected: &[u8], data: &[u8]) -> Result<()> {
    let expected: [u8; 2] = expected
        .try_into()
        .map_err(|_| Error::integrity("invalid checksum length"))?;

    if u16::from_be_bytes(expected) != calculate_simple(data) {
        return Err(Error::integrity("check password"));
    }

    Ok(())
}

/// SHA1 checksum over all given chunks.
pub fn calculate_sha1<I, T>(data: I) -> [u8; 20]
where
    T: AsRef<[u8]>,
    I: IntoIterator<Item = T>,
{
    let mut digest = Sha1::new();
    for chunk in data {
        digest.update(chunk.as_ref());
    }
    digest.finalize().into()
}

/// Verifies that `expected` is the SHA1 hash of `data`.
#[inline]
pub fn sha1(expected: &[u8], data: &[u8]) -> Result<()> {
    if expected != calculate_sha1([data]) {
        return Err(Error::integrity("check password"));
    }

    Ok(())
}

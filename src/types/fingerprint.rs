use std::fmt;

use crate::errors::Result;
use crate::types::KeyId;

/// A V4 fingerprint: SHA-1 over the public key packet body.
#[derive(Clone, Copy, Eq, PartialEq, Hash, derive_more::Debug)]
#[debug("Fingerprint({})", hex::encode(_0))]
pub struct Fingerprint([u8; 20]);

impl Fingerprint {
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        ensure_eq!(input.len(), 20, "invalid fingerprint length");
        let mut r = [0u8; 20];
        r.copy_from_slice(input);

        Ok(Fingerprint(r))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The key ID is the low order 64 bits of the fingerprint.
    pub fn key_id(&self) -> KeyId {
        let mut id = [0u8; 8];
        id.copy_from_slice(&self.0[12..]);
        KeyId::from(id)
    }
}

impl From<[u8; 20]> for Fingerprint {
    fn from(value: [u8; 20]) -> Self {
        Fingerprint(value)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_id() {
        let fp = Fingerprint::from_slice(
            &hex::decode("d2e16d3e5b8c7c2e8b2f5f0e3a6c0b1f2d3e4f50").unwrap(),
        )
        .unwrap();
        assert_eq!(hex::encode(fp.key_id()), "3a6c0b1f2d3e4f50");
        assert_eq!(fp.to_string(), "D2E16D3E5B8C7C2E8B2F5F0E3A6C0B1F2D3E4F50");
        assert!(Fingerprint::from_slice(&[0u8; 16]).is_err());
    }
}

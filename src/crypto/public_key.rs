use num_enum::{FromPrimitive, IntoPrimitive};

/// Public key algorithms.
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-9.1>
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(u8)]
pub enum PublicKeyAlgorithm {
    /// RSA (Encrypt and Sign)
    RSA = 1,
    /// DEPRECATED: RSA (Encrypt-Only)
    RSAEncrypt = 2,
    /// DEPRECATED: RSA (Sign-Only)
    RSASign = 3,
    /// Elgamal (Encrypt-Only)
    ElgamalEncrypt = 16,
    /// DSA (Digital Signature Algorithm)
    DSA = 17,
    /// Elliptic Curve: RFC-6637
    ECDH = 18,
    /// ECDSA: RFC-6637
    ECDSA = 19,
    /// DEPRECATED: Elgamal (Encrypt and Sign)
    Elgamal = 20,
    /// Reserved for Diffie-Hellman (X9.42, as defined for IETF-S/MIME)
    DiffieHellman = 21,
    /// EdDSA legacy format
    EdDSALegacy = 22,

    #[num_enum(catch_all)]
    Unknown(#[cfg_attr(test, proptest(strategy = "100u8.."))] u8),
}

impl PublicKeyAlgorithm {
    pub fn is_rsa(self) -> bool {
        matches!(
            self,
            PublicKeyAlgorithm::RSA | PublicKeyAlgorithm::RSAEncrypt | PublicKeyAlgorithm::RSASign
        )
    }

    pub fn is_elgamal(self) -> bool {
        matches!(
            self,
            PublicKeyAlgorithm::ElgamalEncrypt | PublicKeyAlgorithm::Elgamal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8() {
        assert_eq!(PublicKeyAlgorithm::from(1), PublicKeyAlgorithm::RSA);
        assert_eq!(PublicKeyAlgorithm::from(16), PublicKeyAlgorithm::ElgamalEncrypt);
        assert_eq!(PublicKeyAlgorithm::from(17), PublicKeyAlgorithm::DSA);
        assert_eq!(PublicKeyAlgorithm::from(99), PublicKeyAlgorithm::Unknown(99));
        assert!(PublicKeyAlgorithm::RSASign.is_rsa());
        assert!(PublicKeyAlgorithm::Elgamal.is_elgamal());
        assert!(!PublicKeyAlgorithm::DSA.is_rsa());
    }
}

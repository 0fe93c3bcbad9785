use std::num::TryFromIntError;

use snafu::Snafu;

use crate::crypto::sym::SymmetricKeyAlgorithm;

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

/// Error types
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The input ended before a complete structure could be read.
    #[snafu(display("truncated input: {context} needed {needed} bytes, {remaining} remaining"))]
    TruncatedInput {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[snafu(display("unsupported key version {version}"))]
    UnsupportedVersion { version: u8 },
    #[snafu(display("unsupported string-to-key specifier {typ}"))]
    UnsupportedS2kSpecifier { typ: u8 },
    #[snafu(display("unsupported packet framing: {message}"))]
    UnsupportedFraming { message: String },
    #[snafu(display("unsupported cipher {alg:?}"))]
    UnsupportedCipher { alg: SymmetricKeyAlgorithm },
    #[snafu(display("invalid block size {size}"))]
    InvalidBlockSize { size: usize },
    #[snafu(display("invalid key size {size}"))]
    InvalidKeySize { size: usize },
    /// Checksum or hash over decrypted (or cleartext) secret material did not match.
    ///
    /// When returned from an unlock operation this almost always means the
    /// password was wrong.
    #[snafu(display("integrity mismatch: {message}"))]
    IntegrityMismatch { message: String },
    #[snafu(display("inconsistent state: {message}"))]
    InconsistentState { message: String },
    /// Signals algorithms and parameters outside of what this crate handles.
    #[snafu(display("Unsupported: {message}"))]
    Unsupported { message: String },
    #[snafu(display("cfb: invalid key iv length"))]
    CfbInvalidKeyIvLength,
    #[snafu(display("{message}"))]
    Message { message: String },
    #[snafu(transparent)]
    IO { source: std::io::Error },
    #[snafu(transparent)]
    TryFromInt { source: TryFromIntError },
}

impl Error {
    /// Returns true if this is the result of a failed integrity check,
    /// e.g. because of a wrong password.
    pub fn is_integrity_mismatch(&self) -> bool {
        matches!(self, Self::IntegrityMismatch { .. })
    }

    pub(crate) fn integrity(message: impl Into<String>) -> Self {
        Self::IntegrityMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: message.into(),
        }
    }
}

impl From<cipher::InvalidLength> for Error {
    fn from(_: cipher::InvalidLength) -> Error {
        Error::CfbInvalidKeyIvLength
    }
}

impl From<String> for Error {
    fn from(err: String) -> Error {
        Error::Message { message: err }
    }
}

#[macro_export]
macro_rules! unsupported_err {
    ($e:expr) => {
        return Err($crate::errors::Error::Unsupported { message: $e.to_string()})
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Unsupported { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! bail {
    ($e:expr) => {
        return Err($crate::errors::Error::Message { message: $e.to_string() })
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Message { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! format_err {
    ($e:expr) => {
        $crate::errors::Error::Message { message: $e.to_string() }
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::errors::Error::Message { message: format!($fmt, $($arg)+) }
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            $crate::bail!($e);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::bail!($fmt, $($arg)+);
        }
    };
}

#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr) => ({
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::bail!(r#"assertion failed: `(left == right)`
  left: `{:?}`,
 right: `{:?}`"#, left_val, right_val)
                }
            }
        }
    });
    ($left:expr, $right:expr,) => ({
        $crate::ensure_eq!($left, $right)
    });
    ($left:expr, $right:expr, $($arg:tt)+) => ({
        match (&($left), &($right)) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::bail!(r#"assertion failed: `(left == right)`
  left: `{:?}`,
 right: `{:?}`: {}"#, left_val, right_val,
                           format_args!($($arg)+))
                }
            }
        }
    });
}

pub use crate::{bail, ensure, ensure_eq, format_err, unsupported_err};

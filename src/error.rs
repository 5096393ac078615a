use std::path::PathBuf;
use num::BigUint;
use num::bigint::ParseBigIntError;

#[derive(Debug, thiserror::Error)]
pub enum RsaError {
    #[error("Size hint must be at least 1, got {0}")]
    InvalidSizeHint(u64),

    #[error("Invalid sampling range [{min}, {max}]")]
    InvalidRange { min: BigUint, max: BigUint },

    #[error("No prime found in [{min}, {max}] after {attempts} attempts")]
    RangeExhausted { min: BigUint, max: BigUint, attempts: u64 },

    #[error("{exponent} has no inverse modulo {modulus}")]
    NotInvertible { exponent: BigUint, modulus: BigUint },

    #[error("Malformed key file {path:?}: {reason}")]
    MalformedKey { path: PathBuf, reason: String },

    #[error("Could not locate the home directory")]
    NoHomeDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    ParseInt(#[from] ParseBigIntError)
}

pub type Result<T> = std::result::Result<T, RsaError>;

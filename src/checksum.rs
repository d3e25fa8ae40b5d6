//! Checksum calculation over a streaming byte source.
//!
//! The digest is computed incrementally: each chunk is absorbed into the
//! running hash state and then discarded, so memory stays bounded no matter
//! how large the input is. The resulting value is chunk-boundary
//! independent: the same bytes produce the same checksum regardless of how
//! they were split.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

/// Buffer size used when draining a reader.
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Name recorded for the default hash function.
pub const DEFAULT_ALGORITHM: &str = "sha256";

/// Errors from checksum computation.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// The input yielded no bytes at all.
    #[error("input is empty")]
    EmptyInput,

    /// The byte source failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// A computed checksum: algorithm name plus lowercase hex digest.
///
/// Immutable once created. Rendered as `"{algorithm}:{hex}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    algorithm: String,
    hex: String,
}

impl Checksum {
    /// Compute a SHA-256 checksum from a lazy sequence of byte chunks.
    ///
    /// The sequence may be unbounded in length; each chunk is absorbed and
    /// dropped. Fails with [`ChecksumError::EmptyInput`] when no bytes were
    /// absorbed (no chunks, or only zero-length chunks).
    pub fn from_chunks<I, B>(chunks: I) -> Result<Self, ChecksumError>
    where
        I: IntoIterator<Item = io::Result<B>>,
        B: AsRef<[u8]>,
    {
        compute_with::<Sha256, _, _>(DEFAULT_ALGORITHM, chunks)
    }

    /// Compute a SHA-256 checksum by draining a reader in fixed-size chunks.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ChecksumError> {
        Self::from_chunks(read_chunks(reader))
    }

    /// Name of the hash function that produced this checksum.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Lowercase hex digest.
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}

/// Error from parsing a rendered checksum string.
#[derive(Debug, thiserror::Error)]
#[error("invalid checksum: {0}")]
pub struct ParseChecksumError(String);

impl FromStr for Checksum {
    type Err = ParseChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm, hex) = s
            .split_once(':')
            .ok_or_else(|| ParseChecksumError(format!("missing ':' in {:?}", s)))?;
        if algorithm.is_empty() {
            return Err(ParseChecksumError(format!("empty algorithm in {:?}", s)));
        }
        if hex.is_empty() || !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(ParseChecksumError(format!("invalid hex digest in {:?}", s)));
        }
        Ok(Self {
            algorithm: algorithm.to_string(),
            hex: hex.to_string(),
        })
    }
}

/// Compute a checksum with an explicit hash function.
///
/// `algorithm` is recorded verbatim in the resulting value. The hash state
/// is generic over [`sha2::Digest`], so the one-way function can be swapped
/// without changing the calculator contract.
pub fn compute_with<D, I, B>(algorithm: &str, chunks: I) -> Result<Checksum, ChecksumError>
where
    D: Digest,
    I: IntoIterator<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    let mut hasher = D::new();
    let mut absorbed: u64 = 0;

    for chunk in chunks {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        hasher.update(bytes);
        absorbed += bytes.len() as u64;
    }

    if absorbed == 0 {
        return Err(ChecksumError::EmptyInput);
    }

    Ok(Checksum {
        algorithm: algorithm.to_string(),
        hex: hex::encode(hasher.finalize()),
    })
}

/// Iterate a reader as owned byte buffers of at most [`READ_CHUNK_SIZE`].
///
/// The iterator ends at EOF or after yielding the first error.
pub fn read_chunks<R: Read>(mut reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        match reader.read(&mut buf) {
            Ok(0) => {
                done = true;
                None
            }
            Ok(n) => {
                buf.truncate(n);
                Some(Ok(buf))
            }
            Err(e) => {
                done = true;
                Some(Err(e))
            }
        }
    })
}

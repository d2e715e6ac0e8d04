//! Streaming file fingerprints.
//!
//! # Overview
//!
//! A [`Fingerprint`] identifies file content for comparison: the file size
//! together with a cryptographic digest of the full content. Its textual key
//! is the size zero-padded to [`SIZE_DIGITS`] decimal digits followed by the
//! lowercase hex digest, so keys for equal sizes sort together.
//!
//! Files are streamed through the digest with a fixed-size buffer; nothing is
//! cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use basedupe::scanner::{Fingerprinter, HashAlgorithm};
//! use std::path::Path;
//!
//! let fingerprinter = Fingerprinter::new(HashAlgorithm::Sha256);
//! let fp = fingerprinter.fingerprint_path(Path::new("photo.jpg")).unwrap();
//! println!("{}", fp);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::HashError;

/// Width of the zero-padded size prefix (999,999,999,999 bytes max).
pub const SIZE_DIGITS: usize = 12;

/// Read buffer size for streaming file content.
const BUFFER_SIZE: usize = 64 * 1024;

/// Digest used for content fingerprints.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 (64 hex characters)
    #[default]
    Sha256,
    /// BLAKE3 (64 hex characters)
    Blake3,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Content fingerprint: file size plus full-content digest.
///
/// Two files with equal fingerprints are treated as identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// File size in bytes
    pub size: u64,
    /// Lowercase hex digest of the file content
    pub digest: String,
}

impl Fingerprint {
    /// Create a fingerprint from its parts.
    #[must_use]
    pub fn new(size: u64, digest: impl Into<String>) -> Self {
        Self {
            size,
            digest: digest.into(),
        }
    }

    /// Textual key: zero-padded size followed by the digest.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}{}", self.size, self.digest, width = SIZE_DIGITS)
    }
}

/// Computes [`Fingerprint`]s for files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fingerprinter {
    algorithm: HashAlgorithm,
}

impl Fingerprinter {
    /// Create a fingerprinter using the given digest.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Fingerprint a file whose size is already known from the walk.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or fully read.
    pub fn fingerprint(&self, path: &Path, size: u64) -> Result<Fingerprint, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let digest = match self.algorithm {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                stream(path, file, |chunk| hasher.update(chunk))?;
                format!("{:x}", hasher.finalize())
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                stream(path, file, |chunk| {
                    hasher.update(chunk);
                })?;
                hasher.finalize().to_hex().to_string()
            }
        };

        log::trace!("Fingerprinted {} ({} bytes)", path.display(), size);
        Ok(Fingerprint::new(size, digest))
    }

    /// Fingerprint a file, reading its size from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be stat'ed, opened or read.
    pub fn fingerprint_path(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let size = std::fs::metadata(path)
            .map_err(|e| HashError::from_io(path, e))?
            .len();
        self.fingerprint(path, size)
    }
}

/// Feed the whole file to `update` in fixed-size chunks.
fn stream<F>(path: &Path, mut file: File, mut update: F) -> Result<(), HashError>
where
    F: FnMut(&[u8]),
{
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        match file.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => update(&buffer[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(HashError::from_io(path, e)),
        }
    }
}

//! Handle token generation.
//!
//! Every in-flight portal request carries a caller-chosen token that becomes
//! the final segment of its handle object path, so tokens must be unique per
//! request and drawn from the path-safe alphabet `[A-Za-z0-9_]`. We encode
//! each random byte as two characters, one per nibble, which keeps the
//! mapping trivially alphabet-safe (all output lands in `A..=P`).

use rand::RngCore;
use tracing::warn;

use crate::constants::TOKEN_BYTES;

/// Base character for nibble encoding.
const NIBBLE_BASE: u8 = b'A';

/// Failure modes of an entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The read was interrupted; the caller should retry.
    Interrupted,
    /// The source cannot deliver more bytes right now.
    Exhausted,
}

/// Source of random bytes for token generation.
///
/// `fill` writes into a prefix of `buf` and reports how many bytes were
/// written; partial fills are allowed.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> std::result::Result<usize, EntropyError>;
}

/// Entropy source backed by the operating system.
#[derive(Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> std::result::Result<usize, EntropyError> {
        rand::rngs::OsRng
            .try_fill_bytes(buf)
            .map_err(|_| EntropyError::Exhausted)?;
        Ok(buf.len())
    }
}

/// Generate a handle token from `source`.
///
/// Requests [`TOKEN_BYTES`] random bytes, retrying interrupted reads. If the
/// source stops delivering, the token is generated from the bytes obtained
/// so far (best effort, matching the portal recommendation of treating the
/// token as opaque); the degraded case is logged. Output length is always
/// twice the number of bytes consumed.
pub fn handle_token<S: EntropySource>(source: &mut S) -> String {
    let mut raw = [0u8; TOKEN_BYTES];
    let mut filled = 0;
    while filled < TOKEN_BYTES {
        match source.fill(&mut raw[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n.min(TOKEN_BYTES - filled),
            Err(EntropyError::Interrupted) => continue,
            Err(EntropyError::Exhausted) => break,
        }
    }
    if filled < TOKEN_BYTES {
        warn!(
            bytes = filled,
            "entropy source underperformed; using a short handle token"
        );
    }

    let mut token = String::with_capacity(filled * 2);
    for &byte in &raw[..filled] {
        token.push((NIBBLE_BASE + (byte & 0x0f)) as char);
        token.push((NIBBLE_BASE + (byte >> 4)) as char);
    }
    token
}

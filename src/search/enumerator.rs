//! Candidate key enumeration
//!
//! Four nested loops walk a single working bit buffer:
//!
//! ```text
//! invert    in 0..2    -> invert the buffer after each pass
//!   reverse in 0..2    -> reverse the buffer after each pass
//!     rotate in 0..len -> render hex at the start, rotate left by one at the end
//!       hex_shift in 0..16 -> yield "1" + hex, then shift every hex digit by one
//! ```
//!
//! Every transform is cumulative: nothing is reset between passes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bits::{BitString, shift_hex_digits};
use crate::consts::{KEY_PREFIX, MAX_KEY_DIGITS};

/// Iterations of the innermost digit-shift loop
pub const HEX_SHIFTS: usize = 16;

/// A prefixed hex private key candidate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateKey {
    hex: String,
}

impl CandidateKey {
    /// Build a key from the working hex string by prepending the prefix nibble
    pub fn from_hex_body(hex: &str) -> Self {
        let mut digits = String::with_capacity(hex.len() + 1);
        digits.push(KEY_PREFIX);
        digits.push_str(hex);
        Self { hex: digits }
    }

    /// Lowercase hex without leading zeros or `0x`
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Big-endian 256-bit scalar, or None if the key is wider than 64 digits
    pub fn to_bytes(&self) -> Option<[u8; 32]> {
        if self.hex.len() > MAX_KEY_DIGITS {
            return None;
        }
        let padded = format!("{:0>64}", self.hex);
        let mut out = [0u8; 32];
        hex::decode_to_slice(padded, &mut out).ok()?;
        Some(out)
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Loop indices that produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct LoopIndex {
    pub invert: u8,
    pub reverse: u8,
    pub rotate: usize,
    pub hex_shift: u8,
}

impl LoopIndex {
    /// The first candidate of a tick
    pub fn is_first(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for LoopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.invert, self.reverse, self.rotate, self.hex_shift
        )
    }
}

/// One enumerated candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: CandidateKey,
    pub index: LoopIndex,
}

/// Number of candidates generated for a fingerprint of `len` bits
pub fn candidates_per_tick(len: usize) -> usize {
    2 * 2 * len * HEX_SHIFTS
}

/// Lazy, single-use iterator over every candidate derived from a fingerprint
#[derive(Debug, Clone)]
pub struct Candidates {
    working: BitString,
    hex: String,
    pad_width: usize,
    current: Option<LoopIndex>,
    yielded: usize,
}

/// Start enumerating candidates for `fingerprint`
///
/// # Panics
///
/// If the fingerprint is empty.
pub fn generate(fingerprint: &BitString) -> Candidates {
    assert!(!fingerprint.is_empty(), "fingerprint must not be empty");
    let pad_width = fingerprint.len() / 4;
    Candidates {
        hex: fingerprint.to_hex(pad_width),
        working: fingerprint.clone(),
        pad_width,
        current: Some(LoopIndex::default()),
        yielded: 0,
    }
}

impl Candidates {
    /// Working bit string the most recent candidate was rendered from
    pub fn working(&self) -> &BitString {
        &self.working
    }

    /// Move to the next loop tuple, applying the end-of-iteration transforms
    fn step(&mut self, mut index: LoopIndex) -> Option<LoopIndex> {
        self.hex = shift_hex_digits(&self.hex);
        index.hex_shift += 1;
        if (index.hex_shift as usize) < HEX_SHIFTS {
            return Some(index);
        }

        index.hex_shift = 0;
        self.working.rotate_left(1);
        index.rotate += 1;
        if index.rotate == self.working.len() {
            index.rotate = 0;
            self.working.reverse();
            index.reverse += 1;
            if index.reverse == 2 {
                index.reverse = 0;
                self.working.invert();
                index.invert += 1;
                if index.invert == 2 {
                    return None;
                }
            }
        }

        self.hex = self.working.to_hex(self.pad_width);
        Some(index)
    }
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        // Transforms are applied on the way into the next candidate so that
        // `working()` still describes the candidate just returned.
        if self.yielded > 0 {
            let previous = self.current?;
            self.current = self.step(previous);
        }
        let index = self.current?;
        self.yielded += 1;
        Some(Candidate {
            key: CandidateKey::from_hex_body(&self.hex),
            index,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.current {
            Some(_) => candidates_per_tick(self.working.len()) - self.yielded,
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates {}

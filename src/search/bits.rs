//! Bit string buffer and the hex-space transforms applied to it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Ordered bits, rendered most significant first as '0'/'1'
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Flip every bit in place
    pub fn invert(&mut self) {
        for bit in &mut self.bits {
            *bit = !*bit;
        }
    }

    /// Reverse bit order in place
    pub fn reverse(&mut self) {
        self.bits.reverse();
    }

    /// Rotate left by `n` positions (modulo length)
    pub fn rotate_left(&mut self, n: usize) {
        if !self.bits.is_empty() {
            let n = n % self.bits.len();
            self.bits.rotate_left(n);
        }
    }

    /// Lowercase hex of the binary value, zero-padded to at least `min_width`
    ///
    /// Never truncates: a value wider than `min_width` keeps all its digits.
    /// A zero value renders as "0" when `min_width` is 0.
    pub fn to_hex(&self, min_width: usize) -> String {
        assert!(!self.bits.is_empty(), "bit string must not be empty");

        let first_set = self.bits.iter().position(|&b| b);
        let significant = match first_set {
            Some(i) => &self.bits[i..],
            None => &self.bits[self.bits.len() - 1..],
        };

        // Group from the least significant end
        let lead = significant.len() % 4;
        let mut digits = String::with_capacity(significant.len() / 4 + 1);
        if lead > 0 {
            digits.push(nibble_char(&significant[..lead]));
        }
        for chunk in significant[lead..].chunks(4) {
            digits.push(nibble_char(chunk));
        }

        if digits.len() >= min_width {
            digits
        } else {
            format!("{}{}", "0".repeat(min_width - digits.len()), digits)
        }
    }
}

fn nibble_char(bits: &[bool]) -> char {
    let value = bits.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32);
    // value < 16 by construction
    char::from_digit(value, 16).unwrap_or('0')
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::InvalidBitString(s.to_string()));
        }
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(Error::InvalidBitString(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl From<BitString> for String {
    fn from(bits: BitString) -> Self {
        bits.to_string()
    }
}

impl TryFrom<String> for BitString {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Map every hex digit to the next one cyclically (0→1, …, f→0)
pub fn shift_hex_digits(hex: &str) -> String {
    hex.chars()
        .map(|c| match c.to_digit(16) {
            Some(d) => char::from_digit((d + 1) % 16, 16).unwrap_or(c),
            None => c,
        })
        .collect()
}

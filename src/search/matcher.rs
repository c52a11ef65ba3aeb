//! Match checking against the fixed target address

use serde::{Deserialize, Serialize};

use super::bits::BitString;
use super::enumerator::{Candidate, CandidateKey, LoopIndex, generate};
use crate::consts::{ADDRESS_VERSION, COMPRESSED_KEYS};
use crate::error::{DeriveError, Error, Result};

/// External capability turning a private key into an address string
pub trait AddressDeriver {
    fn derive_address(
        &self,
        version: u8,
        compressed: bool,
        key: &CandidateKey,
    ) -> std::result::Result<String, DeriveError>;
}

impl<F> AddressDeriver for F
where
    F: Fn(u8, bool, &CandidateKey) -> std::result::Result<String, DeriveError>,
{
    fn derive_address(
        &self,
        version: u8,
        compressed: bool,
        key: &CandidateKey,
    ) -> std::result::Result<String, DeriveError> {
        self(version, compressed, key)
    }
}

/// A candidate whose address equals the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub key: CandidateKey,
    pub index: LoopIndex,
    /// Working bit string the key was rendered from
    pub working: BitString,
    pub address: String,
}

/// Result of one enumeration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every candidate was checked without a match
    Exhausted { checked: usize },
    /// The pass stopped at the first match
    Found(Match),
}

/// Compares derived addresses to the target
pub struct MatchChecker<D> {
    deriver: D,
    target: String,
    version: u8,
    compressed: bool,
}

impl<D: AddressDeriver> MatchChecker<D> {
    /// Checker for mainnet compressed-key addresses
    pub fn new(deriver: D, target: impl Into<String>) -> Self {
        Self {
            deriver,
            target: target.into(),
            version: ADDRESS_VERSION,
            compressed: COMPRESSED_KEYS,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Derive the address for `key`; failure is fatal
    pub fn derive(&self, key: &CandidateKey) -> Result<String> {
        self.deriver
            .derive_address(self.version, self.compressed, key)
            .map_err(|source| Error::Derivation {
                key: key.to_string(),
                source,
            })
    }

    /// The derived address if it equals the target
    pub fn check(&self, key: &CandidateKey) -> Result<Option<String>> {
        let address = self.derive(key)?;
        Ok((address == self.target).then_some(address))
    }

    /// Check every candidate of `fingerprint`, stopping at the first match
    ///
    /// `observer` sees the first candidate of the pass and its address.
    pub fn search(
        &self,
        fingerprint: &BitString,
        mut observer: Option<&mut dyn FnMut(&Candidate, &str)>,
    ) -> Result<SearchOutcome> {
        let mut candidates = generate(fingerprint);
        let mut checked = 0;

        while let Some(candidate) = candidates.next() {
            let address = self.derive(&candidate.key)?;
            checked += 1;

            if candidate.index.is_first()
                && let Some(observe) = observer.as_deref_mut()
            {
                observe(&candidate, &address);
            }

            if address == self.target {
                return Ok(SearchOutcome::Found(Match {
                    key: candidate.key,
                    index: candidate.index,
                    working: candidates.working().clone(),
                    address,
                }));
            }
        }

        Ok(SearchOutcome::Exhausted { checked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::enumerator::candidates_per_tick;
    use std::cell::Cell;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    type Derived = std::result::Result<String, DeriveError>;

    fn stub(hit: &'static str) -> impl Fn(u8, bool, &CandidateKey) -> Derived {
        move |_: u8, _: bool, key: &CandidateKey| -> Derived {
            Ok(if key.as_hex() == hit {
                "target".to_string()
            } else {
                format!("addr-{key}")
            })
        }
    }

    #[test]
    fn test_check() {
        let checker = MatchChecker::new(stub("1ab"), "target");
        assert_eq!(
            checker.check(&CandidateKey::from_hex_body("ab")).unwrap(),
            Some("target".to_string())
        );
        assert_eq!(checker.check(&CandidateKey::from_hex_body("ac")).unwrap(), None);
    }

    #[test]
    fn test_exhaustion_checks_everything() {
        let checker = MatchChecker::new(stub("nothing"), "target");
        let outcome = checker.search(&bits("0110"), None).unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Exhausted { checked: candidates_per_tick(4) }
        );
    }

    #[test]
    fn test_stops_at_first_match() {
        let calls = Cell::new(0usize);
        let deriver = |_: u8, _: bool, key: &CandidateKey| -> Derived {
            calls.set(calls.get() + 1);
            Ok(if key.as_hex() == "17" { "target".to_string() } else { "miss".to_string() })
        };
        let checker = MatchChecker::new(deriver, "target");

        // "0110" -> "6"; shifting once gives "7"
        let outcome = checker.search(&bits("0110"), None).unwrap();
        match outcome {
            SearchOutcome::Found(m) => {
                assert_eq!(m.key.as_hex(), "17");
                assert_eq!(m.index, LoopIndex { invert: 0, reverse: 0, rotate: 0, hex_shift: 1 });
                assert_eq!(m.working.to_string(), "0110");
            }
            other => panic!("expected a match, got {other:?}"),
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_observer_sees_first_candidate_once() {
        let checker = MatchChecker::new(stub("nothing"), "target");
        let mut seen = Vec::new();
        let mut observer = |c: &Candidate, address: &str| {
            seen.push((c.key.to_string(), address.to_string()));
        };
        checker.search(&bits("0110"), Some(&mut observer)).unwrap();
        assert_eq!(seen, vec![("16".to_string(), "addr-16".to_string())]);
    }

    #[test]
    fn test_derivation_failure_is_fatal() {
        let deriver = |_: u8, _: bool, _: &CandidateKey| -> Derived { Err(DeriveError::KeyTooWide(99)) };
        let checker = MatchChecker::new(deriver, "target");
        let err = checker.search(&bits("01"), None).unwrap_err();
        assert!(matches!(err, Error::Derivation { .. }));
    }
}

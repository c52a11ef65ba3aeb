//! Key-candidate search
//!
//! Per tick: bodies -> fingerprint -> candidate keys -> address match.
//! Nothing here touches rendering or platform code; the address backend is
//! supplied through `AddressDeriver`.

pub mod bits;
pub mod enumerator;
pub mod fingerprint;
pub mod matcher;
pub mod p2pkh;

pub use bits::{BitString, shift_hex_digits};
pub use enumerator::{
    Candidate, CandidateKey, Candidates, HEX_SHIFTS, LoopIndex, candidates_per_tick, generate,
};
pub use fingerprint::extract;
pub use matcher::{AddressDeriver, Match, MatchChecker, SearchOutcome};
pub use p2pkh::P2pkhDeriver;

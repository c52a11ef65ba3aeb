//! Fingerprint extraction from body positions

use crate::search::BitString;
use crate::sim::Body;

/// One position-parity bit per body, in simulator order
pub fn extract(bodies: &[Body]) -> BitString {
    BitString::new(bodies.iter().map(Body::position_bit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BODY_COUNT;
    use crate::sim::{Arena, ArenaConfig};
    use glam::DVec2;

    #[test]
    fn test_extract_follows_insertion_order() {
        let bodies = vec![
            Body::new(DVec2::new(101.0, 0.0), DVec2::ZERO, 10.0),
            Body::new(DVec2::new(30.0, 40.0), DVec2::ZERO, 10.0),
            Body::new(DVec2::new(0.0, 7.5), DVec2::ZERO, 10.0),
        ];
        assert_eq!(extract(&bodies).to_string(), "101");
    }

    #[test]
    fn test_extract_length_and_alphabet() {
        let mut arena = Arena::new(ArenaConfig::default(), 2024);
        for _ in 0..10 {
            arena.advance();
            let fingerprint = extract(&arena.bodies).to_string();
            assert_eq!(fingerprint.len(), BODY_COUNT);
            assert!(fingerprint.chars().all(|c| c == '0' || c == '1'));
        }
    }
}

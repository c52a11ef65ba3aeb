//! Ball-ball collision detection and response
//!
//! Overlaps are pushed apart symmetrically along the collision normal, then a
//! simplified impulse is exchanged. Pairs are resolved one at a time in index
//! order, so a triple overlap may leave residual penetration for a tick. The
//! fingerprint depends on this exact sequence.

use glam::DVec2;

use super::body::Body;
use crate::consts::COLLISION_EPSILON;

/// Result of a collision check between two bodies
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the bodies overlap
    pub hit: bool,
    /// Unit normal pointing from the second body towards the first
    pub normal: DVec2,
    /// Distance each body is pushed along the normal
    pub correction: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: DVec2::ZERO,
            correction: 0.0,
        }
    }
}

/// Check whether two bodies overlap
///
/// Bodies exactly touching (distance == r1 + r2) do not collide.
pub fn body_body_collision(a: &Body, b: &Body) -> CollisionResult {
    let delta = a.pos - b.pos;
    let distance = delta.length();
    let reach = a.radius + b.radius;

    if distance >= reach {
        return CollisionResult::miss();
    }

    let correction = 0.5 * (reach - distance + COLLISION_EPSILON);
    // Coincident centres would divide by zero
    let distance = distance.max(1.0);

    CollisionResult {
        hit: true,
        normal: delta / distance,
        correction,
    }
}

/// Separate two overlapping bodies and exchange momentum along the normal
///
/// Returns true if the pair collided.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> bool {
    let result = body_body_collision(a, b);
    if !result.hit {
        return false;
    }

    let n = result.normal;
    a.pos += n * result.correction;
    b.pos -= n * result.correction;

    let relative = a.vel - b.vel;
    let impulse = 2.0 * relative.dot(n) / 2.0;

    a.vel -= n * impulse;
    b.vel += n * impulse;
    true
}

/// Resolve every unordered pair `(i, j > i)` in index order
///
/// Returns the number of colliding pairs.
pub fn resolve_all(bodies: &mut [Body]) -> usize {
    let mut hits = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b) {
                hits += 1;
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f64, y: f64, vx: f64, vy: f64) -> Body {
        Body::new(DVec2::new(x, y), DVec2::new(vx, vy), 10.0)
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let mut a = body(100.0, 100.0, 1.0, 0.0);
        let mut b = body(120.0, 100.0, -1.0, 0.0);

        assert!(!body_body_collision(&a, &b).hit);
        assert!(!resolve_pair(&mut a, &mut b));
        assert_eq!(a.pos, DVec2::new(100.0, 100.0));
        assert_eq!(b.pos, DVec2::new(120.0, 100.0));
    }

    #[test]
    fn test_head_on_exchange() {
        let mut a = body(100.0, 100.0, 2.0, 0.0);
        let mut b = body(115.0, 100.0, -2.0, 0.0);

        assert!(resolve_pair(&mut a, &mut b));

        // overlap = 0.5 * (20 - 15 + 1) = 3, normal points from b to a (-x)
        assert!((a.pos.x - 97.0).abs() < 1e-9);
        assert!((b.pos.x - 118.0).abs() < 1e-9);

        // Equal masses swap normal velocity
        assert!((a.vel.x + 2.0).abs() < 1e-9);
        assert!((b.vel.x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_centres() {
        let a = body(50.0, 50.0, 0.0, 0.0);
        let b = body(50.0, 50.0, 0.0, 0.0);
        let result = body_body_collision(&a, &b);
        assert!(result.hit);
        assert_eq!(result.normal, DVec2::ZERO);
        assert!((result.correction - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_all_index_order() {
        let mut bodies = vec![
            body(100.0, 100.0, 0.0, 0.0),
            body(115.0, 100.0, 0.0, 0.0),
            body(500.0, 500.0, 0.0, 0.0),
        ];
        assert_eq!(resolve_all(&mut bodies), 1);
        // Far body untouched
        assert_eq!(bodies[2].pos, DVec2::new(500.0, 500.0));
        assert!(bodies[0].pos.distance(bodies[1].pos) > 20.0);
    }

    #[test]
    fn test_triple_overlap_leaves_residual() {
        // Three bodies in a row, each overlapping its neighbour
        let mut bodies = vec![
            body(100.0, 100.0, 1.0, 0.0),
            body(110.0, 100.0, 0.0, 0.0),
            body(120.0, 100.0, 0.0, 0.0),
        ];

        // (0,1) hits, (0,2) is clear after the first push, (1,2) hits
        assert_eq!(resolve_all(&mut bodies), 2);

        // (0,1): correction 0.5 * (20 - 10 + 1) = 5.5, velocity handed to 1
        // (1,2): 115.5 vs 120, correction 0.5 * (20 - 4.5 + 1) = 8.25
        let xs: Vec<f64> = bodies.iter().map(|b| b.pos.x).collect();
        let vxs: Vec<f64> = bodies.iter().map(|b| b.vel.x).collect();
        for (got, want) in xs.iter().zip([94.5, 107.25, 128.25]) {
            assert!((got - want).abs() < 1e-9, "x {got} != {want}");
        }
        for (got, want) in vxs.iter().zip([0.0, 0.0, 1.0]) {
            assert!((got - want).abs() < 1e-9, "vx {got} != {want}");
        }
        assert!(bodies.iter().all(|b| b.pos.y == 100.0 && b.vel.y == 0.0));

        // Pushing 1 away from 2 drove it back into 0
        let residual = bodies[0].pos.distance(bodies[1].pos);
        assert!((residual - 12.75).abs() < 1e-9);
        assert!(body_body_collision(&bodies[0], &bodies[1]).hit);
        assert!(!body_body_collision(&bodies[1], &bodies[2]).hit);
    }
}

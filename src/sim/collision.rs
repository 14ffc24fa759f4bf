//! AABB overlap testing
//!
//! The vertical test projects `a` one tick ahead using its current vertical
//! velocity, so a falling body is caught before it sinks into what it lands on.
//! This makes `overlaps(a, b)` and `overlaps(b, a)` differ whenever the two
//! bodies have different vertical velocities.

use super::body::Body;

/// True when `a` (projected one tick ahead on y) touches or intersects `b`
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let a_faces = a.bounds();
    let b_faces = b.bounds();

    let x = a_faces.right >= b_faces.left && a_faces.left <= b_faces.right;
    let y = a_faces.bottom + a.velocity.y <= b_faces.top && a_faces.top >= b_faces.bottom;
    let z = a_faces.front >= b_faces.back && a_faces.back <= b_faces.front;

    x && y && z
}

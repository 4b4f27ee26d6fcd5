use crate::Vec3;

/// Smallest squared (doubled) triangle area treated as non-degenerate.
const DEGENERATE_AREA_SQ: f32 = 1e-12;

/// Barycentric coordinates of a point with respect to a triangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Barycentric {
    /// Weights of the vertices `a`, `b` and `c`; they sum to one.
    Weights { u: f32, v: f32, w: f32 },
    /// The triangle has (near) zero area.
    Degenerate,
}

impl Barycentric {
    /// True when the point lies inside the triangle or on its edges.
    pub fn is_inside(&self) -> bool {
        match *self {
            Barycentric::Weights { u, v, w } => u >= 0.0 && v >= 0.0 && w >= 0.0,
            Barycentric::Degenerate => false,
        }
    }
}

/// Compute barycentric coordinates of `p` (assumed to be on the triangle's
/// plane) relative to the triangle `a`, `b`, `c`.
pub fn barycentric(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> Barycentric {
    let n = (b - a).cross(c - a);
    let area_sq = n.length_squared();
    if area_sq < DEGENERATE_AREA_SQ {
        return Barycentric::Degenerate;
    }

    let u = (c - b).cross(p - b).dot(n) / area_sq;
    let v = (a - c).cross(p - c).dot(n) / area_sq;
    Barycentric::Weights { u, v, w: 1.0 - u - v }
}

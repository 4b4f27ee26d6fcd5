//! Reflection, refraction and Fresnel reflectance.
//!
//! All functions take the surface normal first and an index of refraction
//! relative to the outside medium (air, ior = 1). Whether a ray is entering or
//! leaving the medium is decided by the sign of `direction · normal`.

use crate::Vec3;

/// Reflect `direction` about `normal`.
///
/// `direction` points away from the surface (for example towards a light or
/// back along the incoming ray), and so does the result, which is unit length.
#[inline]
pub fn reflect(normal: Vec3, direction: Vec3) -> Vec3 {
    (2.0 * normal.dot(direction) * normal - direction).normalize()
}

/// Refract the incident `direction` through a surface using Snell's law.
///
/// Returns `None` on total internal reflection.
pub fn refract(normal: Vec3, direction: Vec3, ior: f32) -> Option<Vec3> {
    let mut cosi = direction.dot(normal).clamp(-1.0, 1.0);
    let mut etai = 1.0;
    let mut etat = ior;
    let mut normal = normal;

    if cosi < 0.0 {
        cosi = -cosi;
    } else {
        // Leaving the medium
        std::mem::swap(&mut etai, &mut etat);
        normal = -normal;
    }

    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        return None;
    }

    Some(eta * direction + (eta * cosi - k.sqrt()) * normal)
}

/// Fraction of light reflected at a dielectric boundary (exact Fresnel
/// equations, unpolarised light).
///
/// Always in `[0, 1]`; exactly `1.0` under total internal reflection.
pub fn fresnel(normal: Vec3, direction: Vec3, ior: f32) -> f32 {
    let cosi = direction.dot(normal).clamp(-1.0, 1.0);
    let (etai, etat) = if cosi > 0.0 { (ior, 1.0) } else { (1.0, ior) };

    let sint = etai / etat * (1.0 - cosi * cosi).max(0.0).sqrt();
    if sint >= 1.0 {
        return 1.0;
    }

    let cost = (1.0 - sint * sint).max(0.0).sqrt();
    let cosi = cosi.abs();

    let rs = (etat * cosi - etai * cost) / (etat * cosi + etai * cost);
    let rp = (etai * cosi - etat * cost) / (etai * cosi + etat * cost);

    ((rs * rs + rp * rp) / 2.0).clamp(0.0, 1.0)
}

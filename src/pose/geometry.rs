//! Pure 2D joint-angle geometry.

/// Interior angle at vertex `b` between rays `b -> a` and `b -> c`, in
/// degrees, always within [0, 180].
///
/// Degenerate input (either ray has zero length, i.e. coincident points from
/// a glitched detection) yields 0.0 rather than an error; callers treat such
/// an angle as unusable for phase decisions.
pub fn joint_angle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    let ba = (a.0 - b.0, a.1 - b.1);
    let bc = (c.0 - b.0, c.1 - b.1);

    let ba_len = (ba.0 * ba.0 + ba.1 * ba.1).sqrt();
    let bc_len = (bc.0 * bc.0 + bc.1 * bc.1).sqrt();
    if ba_len == 0.0 || bc_len == 0.0 {
        return 0.0;
    }

    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    // Clamp before acos: rounding can push the cosine just past ±1.
    let cosine = (dot / (ba_len * bc_len)).clamp(-1.0, 1.0);

    cosine.acos().to_degrees()
}

/// Built-in model point sets
use crate::vector::Vector;

/// The eight corners of an axis-aligned cube of edge `size` centered on the
/// origin, ordered by (x, y, z) sign bits.
pub fn cube(size: f64) -> Vec<Vector> {
    let half = size / 2.0;
    (0..8)
        .map(|bits| {
            let pick = |bit: u32| if bits & (1 << bit) == 0 { -half } else { half };
            Vector::from_nonempty(vec![pick(0), pick(1), pick(2)])
        })
        .collect()
}

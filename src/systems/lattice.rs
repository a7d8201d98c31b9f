//! `DistributionTest`: a centered cubic lattice, used to exercise tree
//! construction on a regular, non-random distribution (spec.md §4.7).

use crate::body::Body;
use crate::vec3::Vec3;

const SPACING: f64 = 4e4;
const MASS: f64 = 5e6;

/// `floor(n^(1/3))`, computed exactly (an `f64::cbrt` round-trip can land
/// just under an exact cube, e.g. `1000f64.cbrt() < 10.0`).
fn integer_cbrt_floor(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).cbrt().round() as usize;
    while r > 0 && r * r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}

pub(super) fn generate(slots: &mut [Option<Body>]) {
    let n = slots.len();
    let side = integer_cbrt_floor(n);
    if side == 0 {
        return;
    }

    // Index from the lattice's own center (`i - side/2`, not `i - (side-1)/2`)
    // so the half-extent is `(side/2)*SPACING` — spec.md S5's literal bound
    // for N=1000/side=10 is `5*SPACING`, not the `4.5*SPACING` a
    // corner-anchored centering would give.
    let half = side as f64 / 2.;
    let mut idx = 0usize;

    'fill: for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                if idx >= n {
                    break 'fill;
                }
                let position = Vec3::new(
                    (i as f64 - half) * SPACING,
                    (j as f64 - half) * SPACING,
                    (k as f64 - half) * SPACING,
                );
                slots[idx] = Some(Body::new(position, MASS));
                idx += 1;
            }
        }
    }
}

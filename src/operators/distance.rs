//! Exact squared-Euclidean distance transform.
//!
//! Implements the two-phase linear-time algorithm of Meijster, Roerdink and
//! Hesselink, "A general algorithm for computing distance transforms in
//! linear time", Mathematical Morphology and its Applications to Image and
//! Signal Processing, pp. 331-340, Kluwer, 2000.

use crate::grid::Grid2D;

/// Squared distance of a candidate at offset `d` carrying 1D distance `g`.
#[inline]
fn envelope(d: i64, g: f32) -> f32 {
    (d * d) as f32 + g * g
}

/// Horizontal break point between the parabolas centered at `i` and `u`.
#[inline]
fn separation(i: usize, u: usize, gi: f32, gu: f32) -> i64 {
    let (i, u) = (i as i64, u as i64);
    (((u * u - i * i) as f32 + gu * gu - gi * gi) / (2 * (u - i)) as f32) as i64
}

/// Exact squared Euclidean distance to the nearest foreground cell.
///
/// A cell is foreground iff its value is strictly positive; foreground
/// cells map to distance 0. Runs in O(n0 * n1) with no approximation.
///
/// With no foreground cell anywhere, the 1D sentinel `n0 + n1` propagates
/// through the envelope formula and every output stays bounded by
/// `(n0 - 1)^2 + (n0 + n1)^2`; this is a defined "maximum distance"
/// result, not an error.
pub fn distance_transform(field: &Grid2D) -> Grid2D {
    let shape = field.shape();
    let (ni, nj) = (shape.n0(), shape.n1());
    let inf = (ni + nj) as f32;

    let mut g = Grid2D::new(shape);
    let mut dt = Grid2D::new(shape);

    // Phase 1: per-row 1D distances along j, forward then backward scan.
    for i in 0..ni {
        g[(i, 0)] = if field[(i, 0)] > 0.0 { 0.0 } else { inf };
        for j in 1..nj {
            g[(i, j)] = if field[(i, j)] > 0.0 {
                0.0
            } else {
                1.0 + g[(i, j - 1)]
            };
        }
        for j in (0..nj - 1).rev() {
            if g[(i, j + 1)] < g[(i, j)] {
                g[(i, j)] = 1.0 + g[(i, j + 1)];
            }
        }
    }

    // Phase 2: per-column lower envelope of parabolas over i.
    // s holds candidate source rows, t the break point where each candidate
    // starts to dominate its predecessor.
    let m = ni.max(nj);
    let mut s = vec![0usize; m];
    let mut t = vec![0i64; m];

    for j in 0..nj {
        let mut q: isize = 0;
        s[0] = 0;
        t[0] = 0;

        for u in 1..ni {
            while q >= 0 {
                let (sq, tq) = (s[q as usize], t[q as usize]);
                if envelope(tq - sq as i64, g[(sq, j)]) <= envelope(tq - u as i64, g[(u, j)]) {
                    break;
                }
                q -= 1;
            }

            if q < 0 {
                q = 0;
                s[0] = u;
            } else {
                let w = 1 + separation(s[q as usize], u, g[(s[q as usize], j)], g[(u, j)]);
                if w < ni as i64 {
                    q += 1;
                    s[q as usize] = u;
                    t[q as usize] = w;
                }
            }
        }

        for u in (0..ni).rev() {
            let sq = s[q as usize];
            dt[(u, j)] = envelope(u as i64 - sq as i64, g[(sq, j)]);
            if u as i64 == t[q as usize] {
                q -= 1;
            }
        }
    }

    dt
}

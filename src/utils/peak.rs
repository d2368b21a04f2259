use crate::float::Float;

struct Point<T: Float> {
    x: T,
    y: T,
}

/// Finds the key maxima of a normalised square difference function: the
/// highest value within each positive lobe, where a lobe starts at a
/// positively-sloped zero crossing and ends at the next negatively-sloped
/// one. The scan starts at index 1, so the peak at lag zero is never a
/// candidate, and stops one short of the last index so that every reported
/// maximum has two neighbours for interpolation.
///
/// Indices are appended to `result` in increasing order. `result` is
/// cleared first; its capacity is reused across calls.
pub fn key_maxima<T: Float>(nsdf: &[T], result: &mut Vec<usize>) {
    result.clear();
    // Index and value of the running maximum of the current lobe, or None
    // when the scan is between lobes.
    let mut current: Option<(usize, T)> = None;
    for tau in 1..nsdf.len().saturating_sub(1) {
        let prev = nsdf[tau - 1];
        let val = nsdf[tau];
        match current {
            None => {
                if prev <= T::zero() && val > T::zero() {
                    current = Some((tau, val));
                }
            }
            Some((idx, best)) => {
                if prev > T::zero() && val <= T::zero() {
                    result.push(idx);
                    current = None;
                } else if val > best {
                    current = Some((tau, val));
                }
            }
        }
    }
    // A lobe still open at the end of the scan has no closing crossing and
    // is not reported.
}

/// Refines the peak at `idx` by fitting a parabola through it and its two
/// neighbours, returning the vertex abscissa and value. Requires
/// `1 <= idx <= data.len() - 2`.
pub fn refine_peak<T: Float>(idx: usize, data: &[T]) -> (T, T) {
    let point = quadratic_interpolation(
        Point {
            x: T::from_usize(idx - 1).unwrap(),
            y: data[idx - 1],
        },
        Point {
            x: T::from_usize(idx).unwrap(),
            y: data[idx],
        },
        Point {
            x: T::from_usize(idx + 1).unwrap(),
            y: data[idx + 1],
        },
    );
    (point.x, point.y)
}

fn quadratic_interpolation<T: Float>(left: Point<T>, center: Point<T>, right: Point<T>) -> Point<T> {
    let two = T::from_f64(2.0).unwrap();
    let denom = two * center.y - left.y - right.y;
    // The three points only bend downward when the denominator is positive.
    // Otherwise `center` already is the best three-point estimate.
    if denom <= T::zero() {
        return center;
    }
    let shift = T::from_f64(0.5).unwrap() * (right.y - left.y) / denom;
    let x = center.x + shift;
    let y = center.y + T::from_f64(0.25).unwrap() * (right.y - left.y) * shift;
    Point { x, y }
}

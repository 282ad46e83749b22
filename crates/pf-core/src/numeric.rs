/// Floating point type used throughout system
pub type Real = f64;

/// Machine epsilon of [`Real`].
pub const EPSILON: Real = Real::EPSILON;

/// Replace NaN/Inf with zero.
#[inline]
pub fn finite_or_zero(v: Real) -> Real {
    if v.is_finite() { v } else { 0.0 }
}

/// `count` evenly spaced values from `start` to `end`, both endpoints included.
///
/// `count == 1` yields `[start]`; `count == 0` yields an empty vector.
pub fn linspace(start: Real, end: Real, count: usize) -> Vec<Real> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as Real;
            let mut values: Vec<Real> = (0..count).map(|i| start + step * i as Real).collect();
            // pin the last sample so it does not drift by rounding
            values[count - 1] = end;
            values
        }
    }
}

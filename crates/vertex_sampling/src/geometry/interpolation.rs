//! Linear and bilinear interpolation on a single cell.
//!
//! Invalid intervals and out-of-range inputs yield `NaN` and a warning rather
//! than an error: callers tabulating response maps treat a `NaN` as "no value".
use tracing::warn;

/// Interpolate between `(xmin, f1)` and `(xmax, f2)` at `x`.
pub fn linear_interpolation(x: f64, xmin: f64, xmax: f64, f1: f64, f2: f64) -> f64 {
    if xmax == xmin {
        warn!("x interval not valid, result is NaN");
        return f64::NAN;
    }
    if x < xmin || x > xmax {
        warn!(x, xmin, xmax, "x is not in the given interval, result is NaN");
        return f64::NAN;
    }

    f1 + (f2 - f1) * (x - xmin) / (xmax - xmin)
}

/// Interpolate on the cell `[xmin, xmax] x [ymin, ymax]`.
///
/// `f11 = f(xmin, ymin)`, `f12 = f(xmin, ymax)`, `f21 = f(xmax, ymin)` and
/// `f22 = f(xmax, ymax)`.
#[allow(clippy::too_many_arguments)]
pub fn bilinear_interpolation(
    x: f64,
    xmin: f64,
    xmax: f64,
    y: f64,
    ymin: f64,
    ymax: f64,
    f11: f64,
    f12: f64,
    f21: f64,
    f22: f64,
) -> f64 {
    if xmax == xmin || ymax == ymin {
        warn!("one or more intervals are invalid, result is NaN");
        return f64::NAN;
    }
    if x < xmin || x > xmax || y < ymin || y > ymax {
        warn!(x, y, "x or y is not in the given interval, result is NaN");
        return f64::NAN;
    }

    let dx = xmax - xmin;
    let fxmin = (xmax - x) * f11 / dx + (x - xmin) * f21 / dx;
    let fxmax = (xmax - x) * f12 / dx + (x - xmin) * f22 / dx;
    let dy = ymax - ymin;
    (ymax - y) * fxmin / dy + (y - ymin) * fxmax / dy
}

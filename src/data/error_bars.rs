//! Error overlay geometry derived from a visible series.

/// Symmetric error bars drawn around each visible point.
///
/// Horizontal extents (`left`, `right`) come from the x errors and vertical
/// extents (`top`, `bottom`) from the y errors. Every vector has the same
/// length as the primary series it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBars {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub top: Vec<f64>,
    pub bottom: Vec<f64>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
    /// Cap length: the largest error magnitude over the visible data, `0.0` when empty.
    pub beam: f64,
}

impl ErrorBars {
    /// Build symmetric bars. `x_err` and `y_err` must be as long as `x`/`y`.
    pub fn symmetric(x: &[f64], y: &[f64], x_err: &[f64], y_err: &[f64]) -> Self {
        debug_assert_eq!(x.len(), y.len());
        debug_assert_eq!(x.len(), x_err.len());
        debug_assert_eq!(x.len(), y_err.len());
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            top: y_err.to_vec(),
            bottom: y_err.to_vec(),
            left: x_err.to_vec(),
            right: x_err.to_vec(),
            beam: max_magnitude(x_err.iter().chain(y_err)),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, x_lo, x_hi, y, y_lo, y_hi)` bounds of bar `i`.
    pub fn bounds(&self, i: usize) -> Option<[f64; 6]> {
        Some([
            *self.x.get(i)?,
            self.x[i] - self.left[i],
            self.x[i] + self.right[i],
            self.y[i],
            self.y[i] - self.bottom[i],
            self.y[i] + self.top[i],
        ])
    }
}

// Largest absolute value; NaN entries are skipped, `0.0` if none remain.
fn max_magnitude<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values
        .map(|v| v.abs())
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0)
}

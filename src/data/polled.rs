//! PolledCurve: a curve bound to named columns of a results source.
//!
//! Each `update` replaces the whole series from the current snapshot rather
//! than appending, so values the source rewrites retroactively are picked up.

use tracing::{debug, warn};

use crate::config::PolledCurveConfig;
use crate::data::error_bars::ErrorBars;
use crate::data::source::{ResultsSource, Snapshot};
use crate::data::trace_look::TraceLook;
use crate::drawable::Drawable;
use crate::error::{PlotError, Result};

enum ErrorColumns {
    WithErrors {
        x_err: Option<String>,
        y_err: Option<String>,
        bars: ErrorBars,
    },
    WithoutErrors,
}

pub struct PolledCurve<S: ResultsSource, D: Drawable> {
    source: S,
    drawable: D,
    x: String,
    y: String,
    errors: ErrorColumns,
    force_reload: bool,
}

impl<S: ResultsSource, D: Drawable> PolledCurve<S, D> {
    /// Bind `x`/`y` columns of `source` to `drawable`.
    pub fn new(source: S, drawable: D, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            source,
            drawable,
            x: x.into(),
            y: y.into(),
            errors: ErrorColumns::WithoutErrors,
            force_reload: false,
        }
    }

    /// Also bind error columns. Errors are enabled when either column is given;
    /// the missing side contributes zero extents.
    pub fn with_error_columns(mut self, x_err: Option<&str>, y_err: Option<&str>) -> Self {
        self.errors = if x_err.is_none() && y_err.is_none() {
            ErrorColumns::WithoutErrors
        } else {
            ErrorColumns::WithErrors {
                x_err: x_err.map(str::to_string),
                y_err: y_err.map(str::to_string),
                bars: ErrorBars::default(),
            }
        };
        self
    }

    /// Reload the source before reading it on every `update`.
    pub fn with_force_reload(mut self, force_reload: bool) -> Self {
        self.force_reload = force_reload;
        self
    }

    pub fn from_config(source: S, drawable: D, config: &PolledCurveConfig) -> Self {
        Self::new(source, drawable, config.x.as_str(), config.y.as_str())
            .with_error_columns(config.x_err.as_deref(), config.y_err.as_deref())
            .with_force_reload(config.force_reload)
    }

    /// Refresh the drawable from the source.
    ///
    /// Reload failures and missing columns are returned before the drawable is
    /// touched, so a failed update leaves the previous series on screen.
    pub fn update(&mut self) -> Result<()> {
        if self.force_reload {
            self.source.reload()?;
        }
        let snapshot = self.source.snapshot();

        let xs = bound_column(&snapshot, &self.x)?;
        let ys = bound_column(&snapshot, &self.y)?;
        let errs = match &self.errors {
            ErrorColumns::WithErrors { x_err, y_err, .. } => Some((
                optional_column(&snapshot, x_err.as_deref())?,
                optional_column(&snapshot, y_err.as_deref())?,
            )),
            ErrorColumns::WithoutErrors => None,
        };

        let mut n = xs.len().min(ys.len());
        if let Some((xe, ye)) = errs {
            n = n.min(xe.map_or(n, <[f64]>::len)).min(ye.map_or(n, <[f64]>::len));
        }
        if n != xs.len() || n != ys.len() {
            warn!(x = %self.x, y = %self.y, points = n, "bound columns differ in length, truncating");
        }
        let (xs, ys) = (&xs[..n], &ys[..n]);

        self.drawable.set_data(xs, ys);
        if let (ErrorColumns::WithErrors { bars, .. }, Some((xe, ye))) = (&mut self.errors, errs) {
            let zeros = vec![0.0; n];
            let xe = xe.map_or(&zeros[..], |c| &c[..n]);
            let ye = ye.map_or(&zeros[..], |c| &c[..n]);
            *bars = ErrorBars::symmetric(xs, ys, xe, ye);
            self.drawable.set_error_bars(bars);
        }
        debug!(x = %self.x, y = %self.y, points = n, "polled curve refreshed");
        Ok(())
    }

    /// Style the curve and its error overlay.
    pub fn set_look(&mut self, look: &TraceLook) {
        self.drawable.set_style(look);
    }

    pub fn force_reload(&self) -> bool {
        self.force_reload
    }

    pub fn has_errors(&self) -> bool {
        matches!(self.errors, ErrorColumns::WithErrors { .. })
    }

    pub fn columns(&self) -> (&str, &str) {
        (&self.x, &self.y)
    }

    /// Overlay from the last successful update; `None` when errors are not bound.
    pub fn error_bars(&self) -> Option<&ErrorBars> {
        match &self.errors {
            ErrorColumns::WithErrors { bars, .. } => Some(bars),
            ErrorColumns::WithoutErrors => None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn drawable(&self) -> &D {
        &self.drawable
    }

    pub fn drawable_mut(&mut self) -> &mut D {
        &mut self.drawable
    }
}

fn bound_column<'a>(snapshot: &'a Snapshot, name: &str) -> Result<&'a [f64]> {
    snapshot.column(name).ok_or_else(|| {
        warn!(column = name, "bound column missing from results");
        PlotError::DataBinding {
            column: name.to_string(),
        }
    })
}

fn optional_column<'a>(snapshot: &'a Snapshot, name: Option<&str>) -> Result<Option<&'a [f64]>> {
    name.map(|n| bound_column(snapshot, n)).transpose()
}

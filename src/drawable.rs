//! Drawable: the minimal capability a curve needs from whatever renders it.
//!
//! Curves own a `Drawable` instead of being a plot item themselves. The host
//! decides how the published series, overlay and look end up on screen;
//! [`CurveData`] is the in-memory implementation used by hosts that render
//! from plain vectors each frame.

use std::cell::RefCell;
use std::rc::Rc;

use crate::data::error_bars::ErrorBars;
use crate::data::trace_look::TraceLook;

pub trait Drawable {
    /// Replace the whole visible series. `xs` and `ys` have equal length.
    fn set_data(&mut self, xs: &[f64], ys: &[f64]);

    /// Apply a look to the series and its error overlay.
    fn set_style(&mut self, look: &TraceLook);

    /// Replace the error overlay. Only called by curves configured with errors.
    fn set_error_bars(&mut self, _bars: &ErrorBars) {}
}

impl<D: Drawable + ?Sized> Drawable for Rc<RefCell<D>> {
    fn set_data(&mut self, xs: &[f64], ys: &[f64]) {
        self.borrow_mut().set_data(xs, ys);
    }

    fn set_style(&mut self, look: &TraceLook) {
        self.borrow_mut().set_style(look);
    }

    fn set_error_bars(&mut self, bars: &ErrorBars) {
        self.borrow_mut().set_error_bars(bars);
    }
}

impl<D: Drawable + ?Sized> Drawable for Box<D> {
    fn set_data(&mut self, xs: &[f64], ys: &[f64]) {
        (**self).set_data(xs, ys);
    }

    fn set_style(&mut self, look: &TraceLook) {
        (**self).set_style(look);
    }

    fn set_error_bars(&mut self, bars: &ErrorBars) {
        (**self).set_error_bars(bars);
    }
}

/// Last published state of a curve.
#[derive(Debug, Clone, Default)]
pub struct CurveData {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub error_bars: Option<ErrorBars>,
    pub look: TraceLook,
    /// Incremented on every `set_data`, so hosts can skip redraws of unchanged curves.
    pub generation: u64,
}

impl CurveData {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Wrap in a shared handle so the curve and the host both see the same data.
    pub fn shared<S: Into<String>>(name: S) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(name)))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[0]).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[1]).collect()
    }
}

impl Drawable for CurveData {
    fn set_data(&mut self, xs: &[f64], ys: &[f64]) {
        self.points.clear();
        self.points.extend(xs.iter().zip(ys).map(|(x, y)| [*x, *y]));
        self.generation += 1;
    }

    fn set_style(&mut self, look: &TraceLook) {
        self.look = look.clone();
    }

    fn set_error_bars(&mut self, bars: &ErrorBars) {
        self.error_bars = Some(bars.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_data_replaces_points() {
        let mut curve = CurveData::new("signal");
        curve.set_data(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        curve.set_data(&[9.0], &[8.0]);
        assert_eq!(curve.points, vec![[9.0, 8.0]]);
        assert_eq!(curve.generation, 2);
    }

    #[test]
    fn shared_handle_forwards_calls() {
        let shared = CurveData::shared("s");
        let mut handle = Rc::clone(&shared);
        handle.set_style(&TraceLook::new(3));
        handle.set_data(&[1.0], &[2.0]);
        assert_eq!(shared.borrow().look, TraceLook::new(3));
        assert_eq!(shared.borrow().xs(), vec![1.0]);
    }
}

//! StreamingBuffer: fixed-capacity, append-only curve storage.
//!
//! Records are stored contiguously, two fields per record (`x`, `y`) or four
//! when the buffer was built with errors (`x`, `y`, `x_err`, `y_err`). The
//! element type is chosen through the [`Sample`] type parameter.
//!
//! Visibility lags one record behind the write cursor: an append writes record
//! `ptr`, publishes records `[0, ptr)` and only then advances `ptr`. After `k`
//! successful appends the drawable therefore shows `k - 1` points.

use tracing::{debug, warn};

use crate::config::BufferConfig;
use crate::data::error_bars::ErrorBars;
use crate::data::trace_look::TraceLook;
use crate::drawable::Drawable;
use crate::error::{PlotError, Result};
use crate::events::{DataUpdated, Observers};

/// Numeric element type a buffer can store.
pub trait Sample: Copy + Default + Into<f64> + std::fmt::Debug + 'static {}

impl Sample for f32 {}
impl Sample for f64 {}
impl Sample for i16 {}
impl Sample for i32 {}
impl Sample for u16 {}
impl Sample for u32 {}

enum ErrorMode {
    WithErrors(ErrorBars),
    WithoutErrors,
}

impl ErrorMode {
    fn stride(&self) -> usize {
        match self {
            ErrorMode::WithErrors(_) => 4,
            ErrorMode::WithoutErrors => 2,
        }
    }
}

pub struct StreamingBuffer<D: Drawable, T: Sample = f32> {
    drawable: D,
    errors: ErrorMode,
    storage: Option<Vec<T>>,
    capacity: usize,
    ptr: usize,
    visible: usize,
    data_updated: Observers<DataUpdated>,
}

impl<D: Drawable, T: Sample> StreamingBuffer<D, T> {
    /// Buffer storing plain `(x, y)` records.
    pub fn new(drawable: D) -> Self {
        Self::with_mode(drawable, ErrorMode::WithoutErrors)
    }

    /// Buffer storing `(x, y, x_err, y_err)` records and maintaining an error overlay.
    pub fn with_errors(drawable: D) -> Self {
        Self::with_mode(drawable, ErrorMode::WithErrors(ErrorBars::default()))
    }

    /// Build and prepare a buffer from its configuration.
    pub fn from_config(drawable: D, config: &BufferConfig) -> Result<Self> {
        config.validate()?;
        let mut buf = if config.errors {
            Self::with_errors(drawable)
        } else {
            Self::new(drawable)
        };
        buf.prepare(config.capacity);
        Ok(buf)
    }

    fn with_mode(drawable: D, errors: ErrorMode) -> Self {
        Self {
            drawable,
            errors,
            storage: None,
            capacity: 0,
            ptr: 0,
            visible: 0,
            data_updated: Observers::new(),
        }
    }

    /// Allocate storage for `capacity` records and rewind the write cursor.
    ///
    /// Calling this again discards everything appended so far and clears the
    /// drawable.
    pub fn prepare(&mut self, capacity: usize) {
        let stride = self.errors.stride();
        let reset = self.storage.is_some();
        self.storage = Some(vec![T::default(); capacity * stride]);
        self.capacity = capacity;
        self.ptr = 0;
        debug!(capacity, stride, reset, "streaming buffer prepared");
        if reset {
            self.publish(0);
        }
    }

    /// Append an `(x, y)` record. Buffers built with errors record zero extents.
    pub fn append(&mut self, x: T, y: T) -> Result<()> {
        self.push_record([x, y, T::default(), T::default()])
    }

    /// Append a record with error magnitudes. Buffers built without errors
    /// ignore `x_err` and `y_err`.
    pub fn append_with_errors(&mut self, x: T, y: T, x_err: T, y_err: T) -> Result<()> {
        self.push_record([x, y, x_err, y_err])
    }

    fn push_record(&mut self, record: [T; 4]) -> Result<()> {
        let stride = self.errors.stride();
        let capacity = self.capacity;
        let Some(storage) = self.storage.as_mut() else {
            return Err(PlotError::Configuration(
                "streaming buffer must be prepared before appending".into(),
            ));
        };
        if self.ptr >= capacity {
            warn!(capacity, "streaming buffer overflow, append rejected");
            return Err(PlotError::CapacityExceeded { capacity });
        }

        let base = self.ptr * stride;
        storage[base..base + stride].copy_from_slice(&record[..stride]);

        self.publish(self.ptr);
        self.ptr += 1;

        let event = DataUpdated {
            len: self.ptr,
            visible: self.visible,
        };
        self.data_updated.notify(&event);
        Ok(())
    }

    /// Push records `[0, n)` to the drawable and rebuild the overlay over the same slice.
    fn publish(&mut self, n: usize) {
        let stride = self.errors.stride();
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        let mut xs = Vec::with_capacity(n);
        let mut ys = Vec::with_capacity(n);
        let mut x_err = Vec::new();
        let mut y_err = Vec::new();
        for r in storage.chunks_exact(stride).take(n) {
            xs.push(r[0].into());
            ys.push(r[1].into());
            if stride == 4 {
                x_err.push(r[2].into());
                y_err.push(r[3].into());
            }
        }

        self.drawable.set_data(&xs, &ys);
        if let ErrorMode::WithErrors(bars) = &mut self.errors {
            *bars = ErrorBars::symmetric(&xs, &ys, &x_err, &y_err);
            self.drawable.set_error_bars(bars);
        }
        self.visible = n;
    }

    /// Register a callback run after every successful append.
    pub fn on_data_updated<F>(&mut self, f: F)
    where
        F: FnMut(&DataUpdated) + 'static,
    {
        self.data_updated.subscribe(f);
    }

    /// Receive a `DataUpdated` on a channel after every successful append.
    pub fn subscribe_data_updated(&mut self) -> std::sync::mpsc::Receiver<DataUpdated> {
        self.data_updated.subscribe_channel()
    }

    /// Style the curve and its error overlay.
    pub fn set_look(&mut self, look: &TraceLook) {
        self.drawable.set_style(look);
    }

    pub fn is_prepared(&self) -> bool {
        self.storage.is_some()
    }

    pub fn has_errors(&self) -> bool {
        matches!(self.errors, ErrorMode::WithErrors(_))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records written so far (the write cursor).
    pub fn len(&self) -> usize {
        self.ptr
    }

    pub fn is_empty(&self) -> bool {
        self.ptr == 0
    }

    /// Records currently published to the drawable.
    pub fn visible_len(&self) -> usize {
        self.visible
    }

    pub fn is_full(&self) -> bool {
        self.is_prepared() && self.ptr >= self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.ptr
    }

    /// Raw fields of record `i` (2 or 4 values), if it has been written.
    pub fn record(&self, i: usize) -> Option<&[T]> {
        if i >= self.ptr {
            return None;
        }
        let stride = self.errors.stride();
        self.storage
            .as_ref()
            .map(|s| &s[i * stride..(i + 1) * stride])
    }

    /// The published points as `[x, y]` pairs.
    pub fn visible_points(&self) -> Vec<[f64; 2]> {
        let stride = self.errors.stride();
        self.storage
            .as_ref()
            .map(|s| {
                s.chunks_exact(stride)
                    .take(self.visible)
                    .map(|r| [r[0].into(), r[1].into()])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Current error overlay; `None` for buffers built without errors.
    pub fn error_bars(&self) -> Option<&ErrorBars> {
        match &self.errors {
            ErrorMode::WithErrors(bars) => Some(bars),
            ErrorMode::WithoutErrors => None,
        }
    }

    pub fn drawable(&self) -> &D {
        &self.drawable
    }

    pub fn drawable_mut(&mut self) -> &mut D {
        &mut self.drawable
    }
}

impl<D: Drawable + std::fmt::Debug, T: Sample> std::fmt::Debug for StreamingBuffer<D, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingBuffer")
            .field("drawable", &self.drawable)
            .field("errors", &self.has_errors())
            .field("capacity", &self.capacity)
            .field("ptr", &self.ptr)
            .field("visible", &self.visible)
            .finish()
    }
}

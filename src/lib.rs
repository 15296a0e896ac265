//! Streaming plot updates for live experiment results.
//!
//! Curves redraw as measurements arrive, either by re-reading a results
//! source or by appending to a fixed-capacity buffer, and a crosshair cursor
//! reports the data coordinates under the pointer. Rendering is left to the
//! host: curves publish into a [`Drawable`], the cursor talks to a
//! [`PlotSurface`].
//!
//! Modules:
//! - `data`: results sources, the streaming buffer, polled curves, error bars
//! - `cursor`: rate-limited crosshair readout
//! - `surface`: plot surface capability and view transform
//! - `drawable`: curve output capability
//! - `events`: notification payloads and observer lists
//! - `config`: serde-backed settings
//! - `rate_limit`: time-window event coalescing

pub mod config;
pub mod cursor;
pub mod data;
pub mod drawable;
pub mod error;
pub mod events;
pub mod rate_limit;
pub mod surface;

// Public re-exports for a compact external API
pub use config::{BufferConfig, CursorConfig, GuideLook, PlotConfig, PolledCurveConfig};
pub use cursor::CursorTracker;
pub use data::buffer::{Sample, StreamingBuffer};
pub use data::error_bars::ErrorBars;
pub use data::polled::PolledCurve;
pub use data::source::{MemoryResults, ResultsSource, Snapshot, SourceError};
pub use data::trace_look::TraceLook;
pub use drawable::{CurveData, Drawable};
pub use error::{PlotError, Result};
pub use events::{DataUpdated, Observers, PlotPos, ScreenPos};
pub use rate_limit::RateLimiter;
pub use surface::{GuideLine, Orientation, OverlayId, PlotSurface, PlotView, ViewTransform};

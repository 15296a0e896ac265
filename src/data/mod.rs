pub mod buffer;
pub mod error_bars;
pub mod polled;
pub mod source;
pub mod trace_look;

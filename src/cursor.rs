//! CursorTracker: crosshair guide lines and a data-coordinate readout.
//!
//! Raw pointer moves are fed through a [`RateLimiter`] so a 1 kHz mouse does
//! not turn into 1000 readout updates per second. Each processed move is
//! mapped through the surface's current view transform, published to the
//! coordinate subscribers and used to reposition both guide lines.
//!
//! The surface does not emit pointer events itself. The host reads the pointer
//! from its UI each frame, passes it to [`CursorTracker::pointer_moved`] and
//! calls [`CursorTracker::poll`] so a coalesced move is released once its
//! window closes.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::config::CursorConfig;
use crate::error::{PlotError, Result};
use crate::events::{Observers, PlotPos, ScreenPos};
use crate::rate_limit::RateLimiter;
use crate::surface::{GuideLine, Orientation, OverlayId, PlotSurface};

pub struct CursorTracker<S: PlotSurface> {
    surface: S,
    vertical: GuideLine,
    horizontal: GuideLine,
    vertical_id: OverlayId,
    horizontal_id: OverlayId,
    position: Option<ScreenPos>,
    coordinates: Option<PlotPos>,
    limiter: RateLimiter<ScreenPos>,
    subscribers: Observers<PlotPos>,
}

impl<S: PlotSurface> CursorTracker<S> {
    /// Attach guide lines to `surface` using the default settings (60 updates/s).
    pub fn new(surface: S) -> Self {
        let config = CursorConfig::default();
        let interval = Duration::from_secs_f64(1.0 / config.rate_limit_hz);
        let limiter = RateLimiter::with_interval(interval);
        Self::attach(surface, &config, limiter)
    }

    pub fn with_config(surface: S, config: &CursorConfig) -> Result<Self> {
        config.validate()?;
        let limiter = RateLimiter::new(config.rate_limit_hz)?;
        Ok(Self::attach(surface, config, limiter))
    }

    fn attach(mut surface: S, config: &CursorConfig, limiter: RateLimiter<ScreenPos>) -> Self {
        let mut vertical = GuideLine::new(Orientation::Vertical, config.look.clone());
        let mut horizontal = GuideLine::new(Orientation::Horizontal, config.look.clone());
        vertical.visible = config.visible;
        horizontal.visible = config.visible;
        let vertical_id = surface.add_overlay(&vertical);
        let horizontal_id = surface.add_overlay(&horizontal);
        Self {
            surface,
            vertical,
            horizontal,
            vertical_id,
            horizontal_id,
            position: None,
            coordinates: None,
            limiter,
            subscribers: Observers::new(),
        }
    }

    /// Feed a raw pointer move. Returns `true` if it was processed right away,
    /// `false` if it was coalesced into the pending slot.
    pub fn pointer_moved_at(&mut self, scene: ScreenPos, now: Instant) -> bool {
        match self.limiter.push(scene, now) {
            Some(pos) => {
                self.process(pos);
                true
            }
            None => false,
        }
    }

    pub fn pointer_moved(&mut self, scene: ScreenPos) -> bool {
        self.pointer_moved_at(scene, Instant::now())
    }

    /// Process the latest coalesced move once its window has closed. Call this
    /// from the event loop each frame.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.limiter.poll(now) {
            Some(pos) => {
                self.process(pos);
                true
            }
            None => false,
        }
    }

    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Handler for coalesced pointer moves. `None` is a caller error, distinct
    /// from "no move seen yet".
    pub fn handle_pointer_event(&mut self, event: Option<ScreenPos>) -> Result<()> {
        match event {
            Some(pos) => {
                self.process(pos);
                Ok(())
            }
            None => Err(PlotError::InvalidCall("pointer location not known".into())),
        }
    }

    fn process(&mut self, scene: ScreenPos) {
        self.position = Some(scene);
        self.update();
    }

    /// Re-derive the readout from the last recorded position against the
    /// current view transform. No-op before the first pointer move.
    pub fn update(&mut self) {
        let Some(scene) = self.position else {
            return;
        };
        let data = self.surface.scene_to_data(scene);
        trace!(x = data.x, y = data.y, "cursor coordinates");
        self.coordinates = Some(data);
        self.subscribers.notify(&data);

        self.vertical.pos = data.x;
        self.horizontal.pos = data.y;
        self.sync_overlays();
    }

    pub fn show(&mut self) {
        self.set_visible(true);
    }

    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    fn set_visible(&mut self, visible: bool) {
        self.vertical.visible = visible;
        self.horizontal.visible = visible;
        self.sync_overlays();
    }

    fn sync_overlays(&mut self) {
        self.surface.update_overlay(self.vertical_id, &self.vertical);
        self.surface.update_overlay(self.horizontal_id, &self.horizontal);
    }

    /// Register a callback for every published `(x, y)` readout.
    pub fn on_coordinates<F>(&mut self, f: F)
    where
        F: FnMut(&PlotPos) + 'static,
    {
        self.subscribers.subscribe(f);
    }

    pub fn subscribe_coordinates(&mut self) -> Receiver<PlotPos> {
        self.subscribers.subscribe_channel()
    }

    pub fn is_visible(&self) -> bool {
        self.vertical.visible && self.horizontal.visible
    }

    /// Last processed scene position.
    pub fn position(&self) -> Option<ScreenPos> {
        self.position
    }

    /// Last published data coordinates.
    pub fn coordinates(&self) -> Option<PlotPos> {
        self.coordinates
    }

    pub fn vertical(&self) -> &GuideLine {
        &self.vertical
    }

    pub fn horizontal(&self) -> &GuideLine {
        &self.horizontal
    }

    pub fn has_pending(&self) -> bool {
        self.limiter.has_pending()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for view changes; follow with [`update`](Self::update).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

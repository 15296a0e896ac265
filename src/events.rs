//! Notification types and the observer list used by curves and the cursor.
//!
//! Subscribers are kept in registration order and invoked synchronously on the
//! thread that triggered the notification. A subscriber is either a closure or
//! an `mpsc` channel; channel subscribers are pruned once their receiver has
//! been dropped.

use std::sync::mpsc::{Receiver, Sender};

// ─────────────────────────────────────────────────────────────────────────────
// Positions
// ─────────────────────────────────────────────────────────────────────────────

/// Scene (screen/pixel) coordinates of the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<egui::Pos2> for ScreenPos {
    fn from(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<ScreenPos> for egui::Pos2 {
    fn from(p: ScreenPos) -> Self {
        egui::pos2(p.x, p.y)
    }
}

/// Plot-space (data) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPos {
    pub x: f64,
    pub y: f64,
}

impl PlotPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<egui_plot::PlotPoint> for PlotPos {
    fn from(p: egui_plot::PlotPoint) -> Self {
        Self { x: p.x, y: p.y }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Emitted by a streaming buffer after every successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUpdated {
    /// Records written so far.
    pub len: usize,
    /// Records currently published to the drawable.
    pub visible: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Observers
// ─────────────────────────────────────────────────────────────────────────────

enum Subscriber<T> {
    Callback(Box<dyn FnMut(&T)>),
    Channel(Sender<T>),
}

/// Ordered list of subscribers for one notification type.
pub struct Observers<T> {
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a callback; it runs after every subscriber registered before it.
    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.subscribers.push(Subscriber::Callback(Box::new(f)));
    }

    /// Number of live subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T: Clone> Observers<T> {
    /// Subscribe through a channel. The returned receiver gets a copy of every
    /// notification until it is dropped.
    pub fn subscribe_channel(&mut self) -> Receiver<T> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.subscribers.push(Subscriber::Channel(tx));
        rx
    }

    /// Deliver `event` to every subscriber in registration order.
    pub fn notify(&mut self, event: &T) {
        self.subscribers.retain_mut(|sub| match sub {
            Subscriber::Callback(f) => {
                f(event);
                true
            }
            // Retain only subscribers whose channel is still open.
            Subscriber::Channel(tx) => tx.send(event.clone()).is_ok(),
        });
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callbacks_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut obs: Observers<u32> = Observers::new();
        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            obs.subscribe(move |v| log.borrow_mut().push(format!("{tag}{v}")));
        }
        obs.notify(&7);
        assert_eq!(*log.borrow(), vec!["a7", "b7", "c7"]);
    }

    #[test]
    fn channel_subscriber_receives_copies() {
        let mut obs: Observers<PlotPos> = Observers::new();
        let rx = obs.subscribe_channel();
        obs.notify(&PlotPos::new(1.0, 2.0));
        obs.notify(&PlotPos::new(3.0, 4.0));
        assert_eq!(rx.try_recv().unwrap(), PlotPos::new(1.0, 2.0));
        assert_eq!(rx.try_recv().unwrap(), PlotPos::new(3.0, 4.0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_cleaned_up() {
        let mut obs: Observers<u8> = Observers::new();
        let rx1 = obs.subscribe_channel();
        let rx2 = obs.subscribe_channel();
        drop(rx1);

        obs.notify(&1);
        assert_eq!(obs.len(), 1);
        assert_eq!(rx2.try_recv().unwrap(), 1);
    }

    #[test]
    fn screen_pos_converts_to_egui() {
        let p: egui::Pos2 = ScreenPos::new(5.0, 7.0).into();
        assert_eq!(p, egui::pos2(5.0, 7.0));
        assert_eq!(ScreenPos::from(p), ScreenPos::new(5.0, 7.0));
    }
}

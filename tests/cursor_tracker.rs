use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use liveplot_results::{
    CursorConfig, CursorTracker, GuideLine, OverlayId, PlotError, PlotPos, PlotSurface, PlotView,
    ScreenPos, ViewTransform,
};

fn tracker() -> CursorTracker<PlotView> {
    CursorTracker::new(PlotView::with_transform(ViewTransform::identity()))
}

#[test]
fn identity_transform_round_trip() {
    let mut cursor = tracker();
    let rx = cursor.subscribe_coordinates();

    cursor.handle_pointer_event(Some(ScreenPos::new(5.0, 7.0))).unwrap();

    assert_eq!(rx.try_recv().unwrap(), PlotPos::new(5.0, 7.0));
    assert_eq!(cursor.vertical().pos, 5.0);
    assert_eq!(cursor.horizontal().pos, 7.0);
    let overlays = cursor.surface().overlays();
    assert_eq!(overlays[0].pos, 5.0);
    assert_eq!(overlays[1].pos, 7.0);
}

#[test]
fn burst_in_one_window_yields_one_update() {
    let t0 = Instant::now();
    let mut cursor = tracker();
    let count = Rc::new(RefCell::new(0usize));
    {
        let count = Rc::clone(&count);
        cursor.on_coordinates(move |_| *count.borrow_mut() += 1);
    }

    // 60 Hz gives a window of ~16.7 ms; all of these land inside the first one.
    for i in 0..50u32 {
        let at = t0 + Duration::from_micros(200 * i as u64);
        cursor.pointer_moved_at(ScreenPos::new(i as f32, i as f32), at);
        cursor.poll_at(at);
    }
    assert_eq!(*count.borrow(), 1);
    assert_eq!(cursor.coordinates(), Some(PlotPos::new(0.0, 0.0)));

    // The window closes and the latest position is processed once.
    assert!(cursor.poll_at(t0 + Duration::from_millis(17)));
    assert!(!cursor.poll_at(t0 + Duration::from_millis(18)));
    assert_eq!(*count.borrow(), 2);
    assert_eq!(cursor.coordinates(), Some(PlotPos::new(49.0, 49.0)));
}

#[test]
fn custom_rate_limit_is_honored() {
    let t0 = Instant::now();
    let cfg = CursorConfig {
        rate_limit_hz: 10.0,
        ..Default::default()
    };
    let mut cursor = CursorTracker::with_config(PlotView::new(), &cfg).unwrap();
    assert!(cursor.pointer_moved_at(ScreenPos::new(1.0, 1.0), t0));
    assert!(!cursor.pointer_moved_at(ScreenPos::new(2.0, 2.0), t0 + Duration::from_millis(50)));
    assert!(cursor.pointer_moved_at(ScreenPos::new(3.0, 3.0), t0 + Duration::from_millis(101)));
    assert!(!cursor.has_pending());
}

#[test]
fn update_follows_view_changes() {
    let mut cursor = tracker();
    let rx = cursor.subscribe_coordinates();
    cursor.handle_pointer_event(Some(ScreenPos::new(2.0, 3.0))).unwrap();
    assert_eq!(rx.try_recv().unwrap(), PlotPos::new(2.0, 3.0));

    let panned = cursor.surface().transform().translated(10.0, -1.0);
    cursor.surface_mut().set_transform(panned);
    cursor.update();

    assert_eq!(rx.try_recv().unwrap(), PlotPos::new(12.0, 2.0));
    assert_eq!(cursor.vertical().pos, 12.0);
    assert_eq!(cursor.horizontal().pos, 2.0);
    assert_eq!(cursor.position(), Some(ScreenPos::new(2.0, 3.0)));
}

#[test]
fn update_without_position_is_noop() {
    let mut cursor = tracker();
    let rx = cursor.subscribe_coordinates();
    cursor.update();
    assert!(rx.try_recv().is_err());
    assert_eq!(cursor.coordinates(), None);
}

#[test]
fn absent_event_is_invalid_call() {
    let mut cursor = tracker();
    let rx = cursor.subscribe_coordinates();
    let err = cursor.handle_pointer_event(None).unwrap_err();
    assert!(matches!(err, PlotError::InvalidCall(_)));
    assert!(rx.try_recv().is_err());
    assert_eq!(cursor.position(), None);
}

#[test]
fn hide_and_show_keep_position() {
    let mut cursor = tracker();
    cursor.handle_pointer_event(Some(ScreenPos::new(1.0, 2.0))).unwrap();

    cursor.hide();
    assert!(!cursor.is_visible());
    assert!(cursor.surface().overlays().iter().all(|l| !l.visible));
    assert_eq!(cursor.position(), Some(ScreenPos::new(1.0, 2.0)));

    cursor.show();
    assert!(cursor.is_visible());
    assert!(cursor.surface().overlays().iter().all(|l| l.visible));
    assert_eq!(cursor.vertical().pos, 1.0);
}

#[derive(Default)]
struct RecordingSurface {
    added: usize,
    updates: Vec<(OverlayId, f64, bool)>,
}

impl PlotSurface for RecordingSurface {
    fn add_overlay(&mut self, _line: &GuideLine) -> OverlayId {
        self.added += 1;
        OverlayId(self.added - 1)
    }

    fn update_overlay(&mut self, id: OverlayId, line: &GuideLine) {
        self.updates.push((id, line.pos, line.visible));
    }

    fn scene_to_data(&self, scene: ScreenPos) -> PlotPos {
        PlotPos::new(scene.x as f64 * 2.0, scene.y as f64 * -1.0)
    }
}

#[test]
fn works_with_any_surface() {
    let mut cursor = CursorTracker::new(RecordingSurface::default());
    assert_eq!(cursor.surface().added, 2);

    cursor.handle_pointer_event(Some(ScreenPos::new(3.0, 4.0))).unwrap();
    assert_eq!(
        cursor.surface().updates,
        vec![(OverlayId(0), 6.0, true), (OverlayId(1), -4.0, true)]
    );
}

use linshot::annotate::FixedMetrics;
use linshot::capture::{ChannelOrder, PixelSurface, Rgba8};
use linshot::select::{
    run_selection, OverlayError, OverlayEvent, OverlayHost, OverlayKey, PointerButton,
};
use std::collections::VecDeque;

struct FakeDisplay {
    events: VecDeque<OverlayEvent>,
    shown: bool,
    hidden: bool,
    settled: bool,
    last_frame: Option<PixelSurface>,
}

impl FakeDisplay {
    fn new(events: Vec<OverlayEvent>) -> Self {
        Self {
            events: events.into(),
            shown: false,
            hidden: false,
            settled: false,
            last_frame: None,
        }
    }
}

impl OverlayHost for FakeDisplay {
    fn show(&mut self) -> Result<(), OverlayError> {
        self.shown = true;
        Ok(())
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn snapshot(&mut self) -> Result<PixelSurface, OverlayError> {
        assert!(self.shown, "snapshot must happen after show");
        let mut surface = PixelSurface::new(200, 150, ChannelOrder::Bgra);
        surface.fill(Rgba8::rgba(120, 120, 120, 255));
        Ok(surface)
    }

    fn next_event(&mut self) -> Option<OverlayEvent> {
        self.events.pop_front()
    }

    fn present(&mut self, scene: &PixelSurface) {
        assert!(!self.hidden, "no presents after the overlay is hidden");
        self.last_frame = Some(scene.clone());
    }

    fn settle(&mut self) {
        assert!(self.hidden, "settle only after hide");
        self.settled = true;
    }
}

fn primary_drag(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<OverlayEvent> {
    vec![
        OverlayEvent::PointerDown {
            button: PointerButton::Primary,
            x: x0,
            y: y0,
        },
        OverlayEvent::PointerMove { x: x1, y: y1 },
        OverlayEvent::PointerUp {
            button: PointerButton::Primary,
            x: x1,
            y: y1,
        },
    ]
}

#[test]
fn reverse_drag_produces_a_normalized_selection() {
    let mut display = FakeDisplay::new(primary_drag(150, 120, 30, 40));
    let area = run_selection(&mut display, &FixedMetrics::default()).expect("selection");
    assert_eq!((area.x, area.y), (30, 40));
    assert_eq!((area.width, area.height), (120, 80));
    assert!(display.hidden && display.settled);
}

#[test]
fn the_live_frame_shows_the_cutout_and_crosshair() {
    let mut display = FakeDisplay::new(primary_drag(20, 20, 80, 60));
    let _ = run_selection(&mut display, &FixedMetrics::default()).expect("selection");
    let frame = display.last_frame.expect("at least one present");

    // Inside the selection the snapshot shows through unwashed.
    assert_eq!(frame.pixel(50, 40), Rgba8::rgba(120, 120, 120, 255));
    // Outside it the wash darkens the snapshot.
    let outside = frame.pixel(150, 120);
    assert!(outside.r < 120);
    // The crosshair tracks the pointer.
    assert_eq!(frame.pixel(80, 60), Rgba8::rgba(255, 0, 0, 255));
}

#[test]
fn escape_mid_drag_returns_an_empty_area_without_settling() {
    let mut display = FakeDisplay::new(vec![
        OverlayEvent::PointerDown {
            button: PointerButton::Primary,
            x: 10,
            y: 10,
        },
        OverlayEvent::PointerMove { x: 100, y: 100 },
        OverlayEvent::KeyDown(OverlayKey::Escape),
    ]);
    let area = run_selection(&mut display, &FixedMetrics::default()).expect("selection");
    assert!(area.is_empty());
    assert!(display.hidden);
    assert!(!display.settled);
}

#[test]
fn sub_threshold_drag_counts_as_no_selection() {
    let mut display = FakeDisplay::new(primary_drag(60, 60, 63, 64));
    let area = run_selection(&mut display, &FixedMetrics::default()).expect("selection");
    assert!(area.is_empty());
}

#[test]
fn unrelated_keys_leave_the_loop_running() {
    let mut events = vec![OverlayEvent::KeyDown(OverlayKey::Other)];
    events.extend(primary_drag(10, 10, 60, 60));
    let mut display = FakeDisplay::new(events);
    let area = run_selection(&mut display, &FixedMetrics::default()).expect("selection");
    assert_eq!((area.width, area.height), (50, 50));
}

use crate::annotate::text::TextShaper;
use crate::capture::surface::{ChannelOrder, PixelSurface};
use crate::select::area::CaptureArea;
use crate::select::paint::paint_overlay;
use crate::select::state::{OverlayKey, PointerButton, SelectionExit, SelectionTracker};
use std::time::Duration;
use tracing::{debug, info};

/// Delay between hiding the overlay and capturing, so the hide has taken
/// visual effect and the overlay cannot end up in its own capture.
pub const HIDE_SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("overlay init failed: {0}")]
    InitFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    PointerDown { button: PointerButton, x: i32, y: i32 },
    PointerUp { button: PointerButton, x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    KeyDown(OverlayKey),
}

/// The windowing boundary of the selection overlay. The host owns a
/// borderless always-on-top surface spanning the primary display and feeds
/// back input events; the modal loop owns everything else.
pub trait OverlayHost {
    fn show(&mut self) -> Result<(), OverlayError>;

    fn hide(&mut self);

    /// Grab the desktop behind the (shown but not yet painted) overlay.
    fn snapshot(&mut self) -> Result<PixelSurface, OverlayError>;

    /// Block until the next input event. `None` means the host's event
    /// stream ended, which the loop treats as cancellation.
    fn next_event(&mut self) -> Option<OverlayEvent>;

    fn present(&mut self, scene: &PixelSurface);

    /// Wait out [`HIDE_SETTLE_DELAY`] after a hide that precedes a capture.
    fn settle(&mut self);
}

/// Run the modal selection interaction to completion. Does not return until
/// the drag finalizes, Escape cancels, or Enter accepts.
///
/// The returned area may be zero-extent; callers must treat that as "no
/// capture performed". The background snapshot is released before returning.
pub fn run_selection(
    host: &mut dyn OverlayHost,
    shaper: &dyn TextShaper,
) -> Result<CaptureArea, OverlayError> {
    host.show()?;
    let snapshot = match host.snapshot() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            host.hide();
            return Err(err);
        }
    };

    let mut scene = PixelSurface::new(snapshot.width(), snapshot.height(), ChannelOrder::Rgba);
    let mut tracker = SelectionTracker::default();
    paint_overlay(&mut scene, &snapshot, &tracker, shaper);
    host.present(&scene);

    loop {
        let Some(event) = host.next_event() else {
            debug!("overlay event stream ended, treating as cancellation");
            host.hide();
            return Ok(CaptureArea::default());
        };

        let exit = match event {
            OverlayEvent::PointerDown { button, x, y } => {
                tracker.pointer_down(button, x, y);
                None
            }
            OverlayEvent::PointerMove { x, y } => {
                tracker.pointer_move(x, y);
                None
            }
            OverlayEvent::PointerUp { button, x, y } => tracker.pointer_up(button, x, y),
            OverlayEvent::KeyDown(key) => tracker.key_down(key),
        };

        match exit {
            None => {
                paint_overlay(&mut scene, &snapshot, &tracker, shaper);
                host.present(&scene);
            }
            Some(SelectionExit::Finished) => {
                let area = tracker.selection();
                info!(
                    x = area.x,
                    y = area.y,
                    width = area.width,
                    height = area.height,
                    "selection finalized"
                );
                host.hide();
                host.settle();
                return Ok(area);
            }
            Some(SelectionExit::Cancelled) => {
                debug!("selection cancelled");
                host.hide();
                return Ok(tracker.selection());
            }
            Some(SelectionExit::Accepted) => {
                let area = tracker.selection();
                host.hide();
                if !area.is_empty() {
                    host.settle();
                }
                return Ok(area);
            }
        }
    }
}

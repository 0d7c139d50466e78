pub mod area;
pub mod overlay;
pub mod paint;
pub mod state;

pub use area::{CaptureArea, MIN_SELECTION_EXTENT};
pub use overlay::{run_selection, OverlayError, OverlayEvent, OverlayHost, HIDE_SETTLE_DELAY};
pub use state::{OverlayKey, PointerButton, SelectionExit, SelectionPhase, SelectionTracker};

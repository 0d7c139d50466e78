pub mod frame;
pub mod source;
pub mod surface;

pub use source::{CaptureError, CaptureMode, ScreenCaptureSource};
pub use surface::{ChannelOrder, PixelSurface, Rgba8};

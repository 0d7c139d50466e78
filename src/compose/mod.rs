pub mod border;
pub mod clipboard;
pub mod convert;
pub mod export;
pub mod flatten;

pub use border::{add_border, CAPTURE_BORDER_WIDTH};
pub use clipboard::copy_to_clipboard;
pub use convert::to_rgba_bytes;
pub use export::{export_to_file, ExportError};
pub use flatten::flatten;

pub mod history;
pub mod hit;
pub mod model;
pub mod render;
pub mod session;
pub mod text;

pub use history::EditHistory;
pub use hit::hit_test;
pub use model::{Annotation, AnnotationKind, Bounds, Color, FontSpec, ToolKind, ToolSettings};
pub use render::render_annotation;
pub use session::{EditorSession, PressOutcome};
pub use text::{FixedMetrics, GlyphShaper, TextExtent, TextShaper};

use crate::annotate::history::EditHistory;
use crate::annotate::hit::hit_test;
use crate::annotate::model::{Annotation, AnnotationKind, ToolKind, ToolSettings};
use crate::capture::surface::PixelSurface;
use tracing::debug;

/// What a pointer press resolved to, so the host knows whether to open a
/// text prompt or just keep feeding move events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// An existing text annotation is now being dragged.
    DraggingText,
    /// The text tool wants input; the host should prompt and call
    /// `commit_text` with the anchor it was given here.
    TextPrompt,
    /// A new shape annotation drag began.
    BeganAnnotation,
    /// No tool selected and nothing hit.
    Ignored,
}

enum DragState {
    MoveText { index: usize, last: (f32, f32) },
    Draw,
}

/// One editing session against the current captured image. Owns the
/// annotation list, the undo stack, and the in-progress annotation; all
/// mutation happens from event handlers running to completion.
#[derive(Default)]
pub struct EditorSession {
    image: Option<PixelSurface>,
    history: EditHistory,
    settings: ToolSettings,
    selected_tool: Option<ToolKind>,
    in_progress: Option<Annotation>,
    drag: Option<DragState>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working image. Any existing annotations belong to the
    /// previous image and are dropped, undo stack included.
    pub fn set_image(&mut self, image: PixelSurface) {
        self.history.clear();
        self.in_progress = None;
        self.drag = None;
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&PixelSurface> {
        self.image.as_ref()
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn select_tool(&mut self, tool: Option<ToolKind>) {
        self.selected_tool = tool;
    }

    pub fn selected_tool(&self) -> Option<ToolKind> {
        self.selected_tool
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.history.annotations()
    }

    pub fn annotations_mut(&mut self) -> &mut [Annotation] {
        self.history.annotations_mut()
    }

    pub fn in_progress(&self) -> Option<&Annotation> {
        self.in_progress.as_ref()
    }

    /// Existing text wins over starting a new annotation, so text stays
    /// draggable no matter which tool is active.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> PressOutcome {
        if let Some(index) = hit_test(self.history.annotations(), x, y) {
            debug!(index, "dragging existing text annotation");
            self.drag = Some(DragState::MoveText {
                index,
                last: (x, y),
            });
            return PressOutcome::DraggingText;
        }
        match self.selected_tool {
            Some(ToolKind::Text) => PressOutcome::TextPrompt,
            Some(tool) => {
                let mut annotation = Annotation::new(tool, &self.settings);
                annotation.bounds = crate::annotate::model::Bounds::at_point(x, y);
                if tool == ToolKind::Freehand {
                    annotation.push_point(x, y);
                }
                self.in_progress = Some(annotation);
                self.drag = Some(DragState::Draw);
                PressOutcome::BeganAnnotation
            }
            None => PressOutcome::Ignored,
        }
    }

    /// Returns true when the scene changed and a repaint is needed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        match &mut self.drag {
            Some(DragState::MoveText { index, last }) => {
                let (dx, dy) = (x - last.0, y - last.1);
                *last = (x, y);
                if let Some(annotation) = self.history.annotations_mut().get_mut(*index) {
                    annotation.bounds.translate(dx, dy);
                }
                true
            }
            Some(DragState::Draw) => {
                let Some(annotation) = &mut self.in_progress else {
                    return false;
                };
                match annotation.kind {
                    AnnotationKind::Freehand(_) => annotation.push_point(x, y),
                    _ => {
                        annotation.bounds.x2 = x;
                        annotation.bounds.y2 = y;
                    }
                }
                true
            }
            None => false,
        }
    }

    /// Ends the active drag, committing any in-progress annotation.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        let changed = self.pointer_move(x, y);
        if let Some(annotation) = self.in_progress.take() {
            self.history.commit(annotation);
        }
        self.drag = None;
        changed
    }

    /// Empty strings are discarded rather than committed as invisible
    /// annotations.
    pub fn commit_text(&mut self, x: f32, y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut annotation = Annotation::new(ToolKind::Text, &self.settings);
        annotation.kind = AnnotationKind::Text(text.to_string());
        annotation.bounds = crate::annotate::model::Bounds::at_point(x, y);
        self.history.commit(annotation);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }
}

use crate::select::area::CaptureArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    Selecting,
    Finalized,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    Escape,
    Enter,
    Other,
}

/// What the modal loop should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionExit {
    /// Drag released: selection is finalized, hide and settle before capture.
    Finished,
    /// Escape: selection zeroed, leave immediately.
    Cancelled,
    /// Enter: leave immediately with whatever selection currently exists.
    Accepted,
}

/// Tracks one interactive region selection: `Idle → Selecting → Finalized`
/// or `→ Cancelled`. Pointer position is tracked in every phase so the
/// crosshair follows the pointer outside an active drag too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTracker {
    phase: SelectionPhase,
    origin: (i32, i32),
    pointer: (i32, i32),
    selection: CaptureArea,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self {
            phase: SelectionPhase::Idle,
            origin: (0, 0),
            pointer: (0, 0),
            selection: CaptureArea::default(),
        }
    }
}

impl SelectionTracker {
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn is_selecting(&self) -> bool {
        self.phase == SelectionPhase::Selecting
    }

    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// The current selection. Only normalized once the drag has released.
    pub fn selection(&self) -> CaptureArea {
        self.selection
    }

    pub fn pointer_down(&mut self, button: PointerButton, x: i32, y: i32) {
        self.pointer = (x, y);
        if button != PointerButton::Primary || self.phase != SelectionPhase::Idle {
            return;
        }
        self.phase = SelectionPhase::Selecting;
        self.origin = (x, y);
        self.selection = CaptureArea {
            x,
            y,
            width: 0,
            height: 0,
        };
    }

    /// Returns true when a repaint is needed, which is every move: the
    /// crosshair must track the pointer even while idle.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        self.pointer = (x, y);
        if self.phase == SelectionPhase::Selecting {
            self.selection.width = x - self.origin.0;
            self.selection.height = y - self.origin.1;
        }
        true
    }

    pub fn pointer_up(&mut self, button: PointerButton, x: i32, y: i32) -> Option<SelectionExit> {
        self.pointer = (x, y);
        if button != PointerButton::Primary || self.phase != SelectionPhase::Selecting {
            return None;
        }
        self.selection.width = x - self.origin.0;
        self.selection.height = y - self.origin.1;
        self.selection = self.selection.finalize();
        self.phase = SelectionPhase::Finalized;
        Some(SelectionExit::Finished)
    }

    pub fn key_down(&mut self, key: OverlayKey) -> Option<SelectionExit> {
        match key {
            OverlayKey::Escape => {
                self.selection.width = 0;
                self.selection.height = 0;
                self.phase = SelectionPhase::Cancelled;
                Some(SelectionExit::Cancelled)
            }
            OverlayKey::Enter => Some(SelectionExit::Accepted),
            OverlayKey::Other => None,
        }
    }
}

//! Open/fullscreen/drag state of the floating CLI panel.

/// Three independent facets: open, fullscreen, drag offset (in cells).
/// Fullscreen can only change while open; dragging only while not fullscreen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    open: bool,
    fullscreen: bool,
    offset: (i32, i32),
    /// Pointer position minus offset at drag start.
    drag_anchor: Option<(i32, i32)>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Flip open/closed and return the new state.
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.drag_anchor = None;
    }

    /// Flip fullscreen. Ignored while closed; returns the resulting state.
    pub fn toggle_fullscreen(&mut self) -> bool {
        if self.open {
            self.fullscreen = !self.fullscreen;
            self.drag_anchor = None;
        }
        self.fullscreen
    }

    /// Start dragging from pointer `(x, y)`. Refused while closed or fullscreen.
    pub fn begin_drag(&mut self, x: i32, y: i32) -> bool {
        if !self.open || self.fullscreen {
            return false;
        }
        self.drag_anchor = Some((x - self.offset.0, y - self.offset.1));
        true
    }

    /// Start dragging with the panel at `drawn`, the offset it is actually
    /// shown at. Replaces an offset the renderer had to clamp.
    pub fn begin_drag_at(&mut self, x: i32, y: i32, drawn: (i32, i32)) -> bool {
        if !self.open || self.fullscreen {
            return false;
        }
        self.offset = drawn;
        self.begin_drag(x, y)
    }

    /// Follow the pointer. No bounds clamping: the panel may leave the screen.
    pub fn drag_to(&mut self, x: i32, y: i32) {
        if let Some((ax, ay)) = self.drag_anchor {
            self.offset = (x - ax, y - ay);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }
}

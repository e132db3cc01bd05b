//! Pointer drag tracking
//!
//! Independent of game rules: keeps the grab offset so the piece does not
//! jump to the pointer, and reports where it was dropped.

use glam::Vec2;

/// Screen-space origin of the element pieces are positioned in
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
}

impl ContainerRect {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub piece_id: u32,
    /// Pointer minus piece origin, in container space
    pub offset: Vec2,
    /// Piece position following the pointer
    pub current: Vec2,
}

/// Where a drag ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragResult {
    pub piece_id: u32,
    pub position: Vec2,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Begin dragging a piece currently at `piece_pos`. Replaces any drag in
    /// progress.
    pub fn start(
        &mut self,
        piece_id: u32,
        piece_pos: Vec2,
        pointer: Vec2,
        container: ContainerRect,
    ) {
        self.active = Some(ActiveDrag {
            piece_id,
            offset: pointer - container.origin() - piece_pos,
            current: piece_pos,
        });
    }

    /// Follow the pointer. Ignored when no drag is active.
    pub fn update(&mut self, pointer: Vec2, container: ContainerRect) -> Option<Vec2> {
        let drag = self.active.as_mut()?;
        drag.current = pointer - container.origin() - drag.offset;
        Some(drag.current)
    }

    /// Finish the drag and clear state
    pub fn end(&mut self) -> Option<DragResult> {
        self.active.take().map(|drag| DragResult {
            piece_id: drag.piece_id,
            position: drag.current,
        })
    }

    /// Abandon the drag without a result
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

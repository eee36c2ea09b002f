//! # Input Protocol
//!
//! This module defines the pointer events the host application passes to the Canvas.
//! Positions are in **Display Space**: pixels of the element the canvas is shown in,
//! which may be scaled relative to the backing store.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Kind of pointer transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    /// Primary button pressed.
    Down,
    /// Pointer moved (button state irrelevant).
    Move,
    /// Primary button released.
    Up,
    /// Pointer left the canvas element.
    Leave,
}

/// A single pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Position in Display Space (pixels).
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    pub fn down(position: Vec2) -> Self {
        Self::new(PointerKind::Down, position)
    }

    pub fn moved(position: Vec2) -> Self {
        Self::new(PointerKind::Move, position)
    }

    pub fn up(position: Vec2) -> Self {
        Self::new(PointerKind::Up, position)
    }

    pub fn leave(position: Vec2) -> Self {
        Self::new(PointerKind::Leave, position)
    }
}

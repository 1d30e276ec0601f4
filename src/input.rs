//! Touch input queue
//!
//! The host pushes touches as they arrive; the scene drains them at the
//! start of the next tick so input never lands mid-step.

use glam::Vec2;

/// A touch event in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// A finger went down
    Began(Vec2),
    /// A finger lifted
    Ended(Vec2),
}

/// Pending touches for the next tick
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<TouchEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: TouchEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain(&mut self) -> Vec<TouchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

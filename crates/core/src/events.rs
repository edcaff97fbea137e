//! Event sink - the seam to the render/animation collaborator
//!
//! Board operations report what happened as [`BoardEvent`]s instead of driving
//! any presentation themselves. The cascade controller buffers them in a `Vec`
//! that the caller drains; tests that do not care use [`NullSink`].

use crate::types::BoardEvent;

pub trait EventSink {
    fn emit(&mut self, event: BoardEvent);
}

impl EventSink for Vec<BoardEvent> {
    fn emit(&mut self, event: BoardEvent) {
        self.push(event);
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: BoardEvent) {}
}

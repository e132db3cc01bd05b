//! One-second game timer
//!
//! The host drives ticks (a browser interval, a test loop). Each `start`
//! hands out a fresh [`IntervalId`]; ticks carrying any other id are
//! ignored, so at most one interval ever advances the clock.

/// Identifies one armed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalId(u32);

#[derive(Debug, Default)]
pub struct Timer {
    active: Option<IntervalId>,
    generation: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any running interval and arm a new one
    pub fn start(&mut self) -> IntervalId {
        self.stop();
        self.generation = self.generation.wrapping_add(1);
        let id = IntervalId(self.generation);
        self.active = Some(id);
        id
    }

    /// Returns the interval that was running, if any
    pub fn stop(&mut self) -> Option<IntervalId> {
        self.active.take()
    }

    pub fn active(&self) -> Option<IntervalId> {
        self.active
    }

    /// True if `id` is the live interval (the tick should count)
    pub fn tick(&self, id: IntervalId) -> bool {
        self.active == Some(id)
    }
}

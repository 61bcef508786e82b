use crate::geometry::{Point, Rect};
use crate::slider::Frame;

/// Whatever a widget is mounted on. Only its on-screen rectangle matters.
pub trait HostSurface {
    fn bounding_rect(&self) -> Rect;
}

impl HostSurface for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Drag(Point),
    TouchMove(Point),
    Click(Point),
    Resize(Rect),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Widget is not accepting input.
    Ignored,
    Unchanged,
    /// Candidate value jumped too far and was dropped.
    Rejected,
    Changed(f64),
    Relayout,
}

impl InputOutcome {
    pub fn should_redraw(&self) -> bool {
        matches!(self, Self::Changed(_) | Self::Relayout)
    }

    /// Folds several outcomes into the one that matters most for the host.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Changed(v), _) | (_, Self::Changed(v)) => Self::Changed(v),
            (Self::Relayout, _) | (_, Self::Relayout) => Self::Relayout,
            (Self::Rejected, _) | (_, Self::Rejected) => Self::Rejected,
            (Self::Unchanged, _) | (_, Self::Unchanged) => Self::Unchanged,
            _ => Self::Ignored,
        }
    }
}

pub trait Widget {
    fn attach(&mut self, host: &dyn HostSurface);
    fn detach(&mut self);
    fn handle_input(&mut self, event: InputEvent) -> InputOutcome;
    fn render(&self) -> Vec<Frame<'_>>;
}

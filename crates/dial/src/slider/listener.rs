/// Payload of a change notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeEvent {
    pub value: f64,
}

/// Receives every value a slider settles on, including the initial one at attach time.
pub trait SliderChangeListener {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> SliderChangeListener for F
where
    F: Fn(&ChangeEvent),
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}

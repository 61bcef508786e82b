use crate::geometry::{Point, Rect};
use crate::slider::{Frame, Lifecycle, Slider};
use crate::widget::{HostSurface, InputEvent, InputOutcome, Widget};

/// Distance between successive rings.
pub const RING_INSET: f64 = 40.0;

/// Offset applied to every edge of the nth ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingInset {
    pub offset: f64,
}

impl RingInset {
    pub fn nth(index: usize) -> Self {
        Self {
            offset: index as f64 * RING_INSET,
        }
    }

    /// Total reduction of width and height.
    pub fn shrink(&self) -> f64 {
        self.offset * 2.0
    }

    pub fn apply(&self, rect: Rect) -> Rect {
        rect.inset(self.offset)
    }
}

/// Concentric container: the first slider is the outermost ring.
pub struct SliderGroup {
    sliders: Vec<Slider>,
    insets: Vec<RingInset>,
    host: Rect,
    lifecycle: Lifecycle,
    grabbed: Option<usize>,
}

impl SliderGroup {
    pub fn new(sliders: Vec<Slider>) -> Self {
        Self {
            sliders,
            insets: Vec::new(),
            host: Rect::default(),
            lifecycle: Lifecycle::Unattached,
            grabbed: None,
        }
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    pub fn slider_mut(&mut self, index: usize) -> Option<&mut Slider> {
        self.sliders.get_mut(index)
    }

    pub fn insets(&self) -> &[RingInset] {
        &self.insets
    }

    pub fn host(&self) -> Rect {
        self.host
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    /// Innermost slider whose ring contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.sliders
            .iter()
            .rposition(|s| s.is_active() && s.rect().circle_contains(p))
    }

    /// Picks the slider whose handle is under `p` as the drag target.
    pub fn grab_handle(&mut self, p: Point) -> Option<usize> {
        self.grabbed = self.sliders.iter().rposition(|s| s.handle_contains(p));
        self.grabbed
    }

    pub fn grabbed(&self) -> Option<usize> {
        self.grabbed
    }

    pub fn release(&mut self) {
        self.grabbed = None;
    }
}

impl Widget for SliderGroup {
    fn attach(&mut self, host: &dyn HostSurface) {
        if self.lifecycle != Lifecycle::Unattached {
            log::warn!("Slider group already {}, ignoring attach", self.lifecycle);
            return;
        }
        self.lifecycle = Lifecycle::Active;
        self.host = host.bounding_rect();
        self.insets = (0..self.sliders.len()).map(RingInset::nth).collect();

        for (slider, inset) in self.sliders.iter_mut().zip(&self.insets) {
            slider.attach(&inset.apply(self.host));
        }
    }

    fn detach(&mut self) {
        self.grabbed = None;
        self.sliders.iter_mut().for_each(Slider::detach);
        self.lifecycle = Lifecycle::Detached;
    }

    fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        if !self.is_attached() {
            return InputOutcome::Ignored;
        }
        match event {
            InputEvent::Resize(rect) => {
                self.host = rect;
                self.sliders
                    .iter_mut()
                    .zip(&self.insets)
                    .map(|(slider, inset)| slider.handle_input(InputEvent::Resize(inset.apply(rect))))
                    .fold(InputOutcome::Ignored, InputOutcome::merge)
            }
            InputEvent::Click(p) => self
                .hit_test(p)
                .and_then(|i| self.sliders.get_mut(i))
                .map_or(InputOutcome::Ignored, |s| s.handle_input(event)),
            InputEvent::Drag(_) | InputEvent::TouchMove(_) => self
                .grabbed
                .and_then(|i| self.sliders.get_mut(i))
                .map_or(InputOutcome::Ignored, |s| s.handle_input(event)),
        }
    }

    fn render(&self) -> Vec<Frame<'_>> {
        self.sliders.iter().filter_map(Slider::frame).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SliderConfig;
    use crate::slider::Lifecycle;

    fn group(count: usize) -> SliderGroup {
        let sliders = (0..count)
            .map(|_| Slider::new(SliderConfig::default()))
            .collect();
        let mut group = SliderGroup::new(sliders);
        group.attach(&Rect::new(0.0, 0.0, 400.0, 400.0));
        group
    }

    #[test]
    fn test_rings_nest_by_fixed_inset() {
        let group = group(3);
        let offsets: Vec<f64> = group.insets().iter().map(|i| i.offset).collect();
        let shrinks: Vec<f64> = group.insets().iter().map(RingInset::shrink).collect();
        assert_eq!(offsets, vec![0.0, 40.0, 80.0]);
        assert_eq!(shrinks, vec![0.0, 80.0, 160.0]);

        let rects: Vec<Rect> = group.sliders().iter().map(Slider::rect).collect();
        assert_eq!(rects[2], Rect::new(80.0, 80.0, 240.0, 240.0));
        assert!(group.sliders().iter().all(|s| s.lifecycle() == Lifecycle::Active));
    }

    #[test]
    fn test_hit_test_prefers_inner_ring() {
        let group = group(3);
        assert_eq!(group.hit_test(Point::new(200.0, 200.0)), Some(2));
        assert_eq!(group.hit_test(Point::new(200.0, 50.0)), Some(1));
        assert_eq!(group.hit_test(Point::new(200.0, 10.0)), Some(0));
        assert_eq!(group.hit_test(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_drag_needs_grabbed_handle() {
        let mut group = group(2);
        let drag = InputEvent::Drag(Point::new(200.0, 10.0));
        assert_eq!(group.handle_input(drag), InputOutcome::Ignored);

        let handle = group.sliders()[1].frame().unwrap().handle_center();
        assert_eq!(group.grab_handle(handle), Some(1));
        assert_eq!(group.grabbed(), Some(1));
        assert_ne!(group.handle_input(drag), InputOutcome::Ignored);

        group.release();
        assert_eq!(group.grabbed(), None);
        assert_eq!(group.handle_input(drag), InputOutcome::Ignored);
    }

    #[test]
    fn test_resize_keeps_insets() {
        let mut group = group(2);
        let outcome = group.handle_input(InputEvent::Resize(Rect::new(100.0, 100.0, 200.0, 200.0)));
        assert!(outcome.should_redraw());
        assert_eq!(
            group.sliders()[1].rect(),
            Rect::new(140.0, 140.0, 120.0, 120.0)
        );
    }

    #[test]
    fn test_detach_silences_children() {
        let mut group = group(2);
        group.detach();
        assert!(group.render().is_empty());
        assert_eq!(
            group.handle_input(InputEvent::Click(Point::new(200.0, 200.0))),
            InputOutcome::Ignored
        );
    }

    #[test]
    fn test_detached_group_cannot_reattach() {
        let mut group = group(2);
        group.detach();
        assert_eq!(group.lifecycle(), Lifecycle::Detached);

        group.attach(&Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(group.lifecycle(), Lifecycle::Detached);
        assert!(!group.is_attached());
        assert!(group.render().is_empty());
        assert_eq!(
            group.handle_input(InputEvent::Resize(Rect::new(0.0, 0.0, 200.0, 200.0))),
            InputOutcome::Ignored
        );
    }
}

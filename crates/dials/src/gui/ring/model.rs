use crate::config::{Config, DialConfig, ExecCommand};
use crate::sys::exec;
use dial::params::AttributeError;
use dial::{
    ChangeEvent, ConfigError, InputEvent, InputOutcome, InputSession, Point, Rect, ScrollLock,
    Slider, SliderGroup, Widget,
};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("No dial at index {0}")]
    NoSuchDial(usize),
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Per-dial data the slider itself does not carry.
struct DialMeta {
    label: String,
    on_change: Rc<RefCell<Option<ExecCommand>>>,
}

pub struct State {
    pub group: SliderGroup,
    pub size: f64,
    pub pointer: Point,
    /// Dial last touched, shown in the center label.
    pub focus: Option<usize>,
    scroll_lock: ScrollLock,
    session: Option<InputSession>,
    meta: Vec<DialMeta>,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let (group, meta) = Self::init_group(config);
        Self {
            group,
            size: config.size,
            pointer: Point::default(),
            focus: None,
            scroll_lock: ScrollLock::new(),
            session: None,
            meta,
        }
    }

    fn init_group(config: &Config) -> (SliderGroup, Vec<DialMeta>) {
        let (sliders, meta) = config
            .dials
            .iter()
            .enumerate()
            .map(|(i, dial)| Self::init_dial(i, dial))
            .unzip();
        (SliderGroup::new(sliders), meta)
    }

    fn init_dial(index: usize, dial: &DialConfig) -> (Slider, DialMeta) {
        let label = dial_label(index, dial);
        let on_change = Rc::new(RefCell::new(dial.on_change.clone()));

        let hook = on_change.clone();
        let name = label.clone();
        let slider = Slider::new(dial.slider.clone()).with_listener(move |event: &ChangeEvent| {
            log::info!("{} = {}", name, event.value);
            if let Some(command) = hook.borrow().as_ref()
                && let Err(e) = exec::spawn_on_change(command, event.value)
            {
                log::error!("Failed to run on_change for '{}': {}", name, e);
            }
        });

        (slider, DialMeta { label, on_change })
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.meta.get(index).map(|m| m.label.as_str())
    }

    /// Centers the group on `center`, attaching it on first use.
    pub fn place(&mut self, center: Point) -> InputOutcome {
        let host = Rect::centered(center, self.size);
        self.focus = None;
        if self.group.is_attached() {
            self.group.handle_input(InputEvent::Resize(host))
        } else {
            self.group.attach(&host);
            InputOutcome::Relayout
        }
    }

    pub fn pointer_moved(&mut self, p: Point) {
        self.pointer = p;
    }

    /// Starts a drag if `p` is on a handle. The scroll lock is held until [`Self::drag_end`].
    pub fn drag_begin(&mut self, p: Point) -> bool {
        self.pointer = p;
        match self.group.grab_handle(p) {
            Some(index) => {
                self.focus = Some(index);
                self.session = Some(self.scroll_lock.begin_input_session());
                true
            }
            None => false,
        }
    }

    pub fn drag_update(&mut self, p: Point, touch: bool) -> InputOutcome {
        self.pointer = p;
        let event = if touch {
            InputEvent::TouchMove(p)
        } else {
            InputEvent::Drag(p)
        };
        self.group.handle_input(event)
    }

    pub fn drag_end(&mut self) {
        self.group.release();
        if let Some(session) = self.session.take() {
            session.end();
        }
    }

    /// `None` when the click landed outside every ring.
    pub fn click(&mut self, p: Point) -> Option<InputOutcome> {
        let index = self.group.hit_test(p)?;
        self.focus = Some(index);
        Some(self.group.handle_input(InputEvent::Click(p)))
    }

    /// Nudges the dial under the pointer; scrolling up increases the value.
    pub fn scroll(&mut self, dy: f64) -> InputOutcome {
        if self.scroll_lock.is_locked() || dy == 0.0 {
            return InputOutcome::Ignored;
        }
        let Some(index) = self.group.hit_test(self.pointer) else {
            return InputOutcome::Ignored;
        };
        self.focus = Some(index);
        self.group
            .slider_mut(index)
            .map_or(InputOutcome::Ignored, |s| s.nudge(-dy.signum()))
    }

    pub fn set_value(&mut self, index: usize, value: f64) -> Result<(), ControlError> {
        let raw = value.to_string();
        self.configure(index, &[("value".to_string(), raw)])
    }

    /// Applies attribute edits to one dial and re-validates it.
    pub fn configure(
        &mut self,
        index: usize,
        attributes: &[(String, String)],
    ) -> Result<(), ControlError> {
        let slider = self
            .group
            .slider_mut(index)
            .ok_or(ControlError::NoSuchDial(index))?;
        let config = slider
            .config()
            .clone()
            .with_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        slider.reconfigure(config)?;
        Ok(())
    }

    /// Applies a reloaded config. Same dial count reconfigures in place, otherwise the
    /// group is rebuilt on the current host.
    pub fn reload(&mut self, config: &Config) {
        self.size = config.size;

        if config.dials.len() == self.group.len() {
            for (index, (dial, meta)) in config.dials.iter().zip(&mut self.meta).enumerate() {
                meta.label = dial_label(index, dial);
                *meta.on_change.borrow_mut() = dial.on_change.clone();
                if let Some(slider) = self.group.slider_mut(index)
                    && let Err(e) = slider.reconfigure(dial.slider.clone())
                {
                    log::error!("Dial {} left inactive: {}", index, e);
                }
            }
        } else {
            let was_attached = self.group.is_attached();
            let center = self.group.host().center();
            self.drag_end();
            self.group.detach();

            let (group, meta) = Self::init_group(config);
            self.group = group;
            self.meta = meta;
            self.focus = None;
            if was_attached {
                self.place(center);
                return;
            }
        }

        if self.group.is_attached() {
            let center = self.group.host().center();
            self.place(center);
        }
    }
}

fn dial_label(index: usize, dial: &DialConfig) -> String {
    dial.label
        .clone()
        .unwrap_or_else(|| format!("Dial {}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dial::SliderConfig;

    fn config(count: usize) -> Config {
        Config {
            size: 400.0,
            dials: (0..count)
                .map(|i| DialConfig {
                    label: Some(format!("d{i}")),
                    slider: SliderConfig {
                        value: Some(50.0),
                        ..Default::default()
                    },
                    on_change: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn placed(count: usize) -> State {
        let mut state = State::new(&config(count));
        state.place(Point::new(300.0, 300.0));
        state
    }

    #[test]
    fn test_place_attaches_once_then_moves() {
        let mut state = placed(2);
        assert_eq!(state.group.host(), Rect::new(100.0, 100.0, 400.0, 400.0));

        let outcome = state.place(Point::new(500.0, 500.0));
        assert_eq!(outcome, InputOutcome::Relayout);
        assert_eq!(
            state.group.sliders()[1].rect(),
            Rect::new(340.0, 340.0, 320.0, 320.0)
        );
    }

    #[test]
    fn test_click_outside_rings_reports_none() {
        let mut state = placed(2);
        assert_eq!(state.click(Point::new(0.0, 0.0)), None);

        // bottom of the outer ring
        let outcome = state.click(Point::new(300.0, 490.0));
        assert_eq!(outcome, Some(InputOutcome::Unchanged));
        assert_eq!(state.focus, Some(0));
    }

    #[test]
    fn test_scroll_is_locked_during_drag() {
        let mut state = placed(1);
        state.pointer_moved(Point::new(300.0, 120.0));
        assert_eq!(state.scroll(-1.0), InputOutcome::Changed(51.0));

        let handle = state.group.sliders()[0].frame().unwrap().handle_center();
        assert!(state.drag_begin(handle));
        assert_eq!(state.scroll(-1.0), InputOutcome::Ignored);

        state.drag_end();
        assert_eq!(state.scroll(1.0), InputOutcome::Changed(50.0));
    }

    #[test]
    fn test_configure_and_set_value() {
        let mut state = placed(2);
        state
            .configure(1, &[("max".to_string(), "200".to_string())])
            .unwrap();
        assert_eq!(state.group.sliders()[1].params().max, 200.0);

        assert!(matches!(
            state.set_value(1, 500.0),
            Err(ControlError::Config(ConfigError::OutOfRangeValue { .. }))
        ));
        assert!(state.group.sliders()[1].render().is_empty());

        state.set_value(1, 150.0).unwrap();
        assert_eq!(state.group.sliders()[1].value(), 150.0);
        assert!(matches!(
            state.set_value(5, 1.0),
            Err(ControlError::NoSuchDial(5))
        ));
    }

    #[test]
    fn test_reload_rebuilds_when_count_changes() {
        let mut state = placed(2);
        let host = state.group.host();

        state.reload(&config(3));
        assert_eq!(state.group.len(), 3);
        assert_eq!(state.group.host(), host);
        assert_eq!(state.group.render().len(), 3);
        assert_eq!(state.label(2), Some("d2"));
    }

    #[test]
    fn test_reload_reconfigures_in_place() {
        let mut state = placed(2);
        let mut next = config(2);
        next.dials[0].slider.value = Some(10.0);
        next.dials[1].slider.radius = Some(0.0);

        state.reload(&next);
        assert_eq!(state.group.sliders()[0].value(), 10.0);
        assert!(state.group.sliders()[1].render().is_empty());
    }

    #[test]
    fn test_reload_falls_back_to_default_label() {
        let mut state = placed(2);
        assert_eq!(state.label(1), Some("d1"));

        let mut next = config(2);
        next.dials[1].label = None;
        state.reload(&next);
        assert_eq!(state.label(0), Some("d0"));
        assert_eq!(state.label(1), Some("Dial 2"));
    }
}

use crate::geometry::{Bounds, Corner, HANDLE_RADIUS, Point, Rect};
use crate::params::{ConfigError, Params, SliderConfig};
use crate::widget::{HostSurface, InputEvent, InputOutcome, Widget};
use std::f64::consts::PI;
use strum::Display as StrumDisplay;

pub mod listener;
pub mod render;

pub use listener::{ChangeEvent, SliderChangeListener};
pub use render::{ArcFill, Frame, Marker};

/// Pointer samples further apart than this (degrees) are treated as noise.
pub const DEBOUNCE_DEGREES: f64 = 3.0;
/// Largest share of the range a drag may move the value in one update.
pub const TELEPORT_FRACTION: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Lifecycle {
    Unattached,
    Invalid,
    Active,
    Detached,
}

pub struct Slider {
    config: SliderConfig,
    params: Params,
    bounds: Bounds,
    corner: Corner,
    markers: Vec<Marker>,
    rect: Rect,
    lifecycle: Lifecycle,
    listeners: Vec<Box<dyn SliderChangeListener>>,
}

impl Slider {
    pub fn new(config: SliderConfig) -> Self {
        let params = Params::from_config(&config);
        Self {
            config,
            params,
            bounds: Bounds::default(),
            corner: Corner::default(),
            markers: Vec::new(),
            rect: Rect::default(),
            lifecycle: Lifecycle::Unattached,
            listeners: Vec::new(),
        }
    }

    pub fn with_listener(mut self, listener: impl SliderChangeListener + 'static) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: impl SliderChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn value(&self) -> f64 {
        self.params.value
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn corner(&self) -> &Corner {
        &self.corner
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Validates the current parameters, logging the first broken invariant.
    pub fn is_valid(&self) -> bool {
        match self.params.validate() {
            Ok(()) => true,
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        if self.lifecycle != lifecycle {
            log::debug!("Slider {} -> {}", self.lifecycle, lifecycle);
            self.lifecycle = lifecycle;
        }
    }

    fn build(&mut self) {
        self.markers = if self.config.markers {
            render::build_markers(&self.params)
        } else {
            Vec::new()
        };
    }

    fn initialize_bounds(&mut self) {
        self.bounds = Bounds::from_rect(self.rect);
        self.corner = Corner::default();
    }

    fn activate(&mut self) {
        self.build();
        self.initialize_bounds();
        self.change_value(self.params.value);
        self.calculate_corner_by_value(self.params.value);
        self.set_lifecycle(Lifecycle::Active);
    }

    pub fn page_coords_to_deg(&self, p: Point) -> f64 {
        self.bounds.angle_at(p)
    }

    /// Quantized value under `p`. Samples that jump more than the debounce window from the
    /// last rejected sample only move `prev` and keep the current value.
    pub fn calculate_value_from_position(&mut self, p: Point) -> f64 {
        let deg = self.page_coords_to_deg(p);
        let params = &self.params;
        let offset = (params.range() * deg / params.radius / params.step).round() * params.step;
        let value = params.min + offset;

        if self
            .corner
            .prev
            .is_some_and(|prev| (deg - prev).abs() < DEBOUNCE_DEGREES)
            && params.contains(value)
        {
            return value;
        }
        self.corner.prev = Some(deg);
        self.params.value
    }

    pub fn calculate_corner_by_value(&mut self, value: f64) {
        let (deg, tan) = corner_angles(&self.params, value);
        self.corner.deg = deg;
        self.corner.tan = tan;
    }

    /// Runs the pointer pipeline. `check_limit` enables the anti-teleport guard.
    pub fn update_value(&mut self, p: Point, check_limit: bool) -> InputOutcome {
        if !self.is_valid() {
            return InputOutcome::Ignored;
        }
        let old_value = self.params.value;
        let value = self.calculate_value_from_position(p);
        if old_value == value {
            return InputOutcome::Unchanged;
        }
        if check_limit && (old_value - value).abs() > self.params.range() * TELEPORT_FRACTION {
            return InputOutcome::Rejected;
        }
        self.accept(value)
    }

    /// Moves the value by whole steps, clamped to the range.
    pub fn nudge(&mut self, steps: f64) -> InputOutcome {
        if !self.is_active() || !self.is_valid() {
            return InputOutcome::Ignored;
        }
        let params = &self.params;
        let value = (params.value + steps * params.step).clamp(params.min, params.max);
        if value == params.value {
            return InputOutcome::Unchanged;
        }
        self.accept(value)
    }

    fn accept(&mut self, value: f64) -> InputOutcome {
        self.calculate_corner_by_value(value);
        self.change_value(value);
        InputOutcome::Changed(value)
    }

    /// Stores `value`, reflects it into the config and notifies listeners.
    pub fn change_value(&mut self, value: f64) {
        self.params.value = value;
        self.config.value = Some(value);

        let event = ChangeEvent { value };
        for listener in &self.listeners {
            listener.on_change(&event);
        }
    }

    /// Replaces the configuration and re-runs validation. Never emits a change.
    pub fn reconfigure(&mut self, config: SliderConfig) -> Result<(), ConfigError> {
        let params = Params::from_config(&config);
        let result = params.validate();

        if self.lifecycle == Lifecycle::Detached {
            log::warn!("Ignoring reconfiguration of a detached slider");
            return result;
        }

        self.config = config;
        self.params = params;

        match (&result, self.lifecycle) {
            (Err(e), Lifecycle::Unattached) => log::error!("{}", e),
            (Err(e), _) => {
                log::error!("{}", e);
                self.set_lifecycle(Lifecycle::Invalid);
            }
            (Ok(()), Lifecycle::Invalid) => {
                self.build();
                self.initialize_bounds();
                self.calculate_corner_by_value(self.params.value);
                self.set_lifecycle(Lifecycle::Active);
            }
            (Ok(()), Lifecycle::Active) => {
                self.build();
                self.calculate_corner_by_value(self.params.value);
            }
            (Ok(()), _) => {}
        }
        result
    }

    /// Painted state, or `None` while not active.
    pub fn frame(&self) -> Option<Frame<'_>> {
        self.is_active().then(|| Frame {
            rect: self.rect,
            fill: ArcFill::new(&self.params, &self.corner),
            handle: render::handle_offset(&self.bounds, &self.corner),
            markers: &self.markers,
        })
    }

    pub fn handle_contains(&self, p: Point) -> bool {
        self.frame()
            .is_some_and(|frame| frame.handle_center().distance(p) <= HANDLE_RADIUS)
    }
}

/// Arc span and handle angle for `value`. `tan` is derived before the full-circle special case.
pub fn corner_angles(params: &Params, value: f64) -> (f64, f64) {
    let mut deg = (value - params.min) * params.radius / params.range() % 360.0;
    let tan = (deg - 90.0) / 180.0 * PI;

    // keep the arc full at max instead of wrapping to empty
    if deg == 0.0 && value == params.max {
        deg = 360.0;
    }
    (deg, tan)
}

impl Widget for Slider {
    fn attach(&mut self, host: &dyn HostSurface) {
        if self.lifecycle != Lifecycle::Unattached {
            log::warn!("Slider already {}, ignoring attach", self.lifecycle);
            return;
        }
        self.rect = host.bounding_rect();

        if self.is_valid() {
            self.activate();
        } else {
            self.set_lifecycle(Lifecycle::Invalid);
        }
    }

    fn detach(&mut self) {
        self.set_lifecycle(Lifecycle::Detached);
    }

    fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        if !self.is_active() {
            return InputOutcome::Ignored;
        }
        match event {
            InputEvent::Drag(p) | InputEvent::TouchMove(p) => self.update_value(p, true),
            InputEvent::Click(p) => {
                self.corner.prev = Some(self.page_coords_to_deg(p));
                self.update_value(p, false)
            }
            InputEvent::Resize(rect) => {
                self.rect = rect;
                self.initialize_bounds();
                self.calculate_corner_by_value(self.params.value);
                InputOutcome::Relayout
            }
        }
    }

    fn render(&self) -> Vec<Frame<'_>> {
        self.frame().into_iter().collect()
    }
}

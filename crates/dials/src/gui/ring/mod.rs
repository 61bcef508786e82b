use std::f64::consts::PI;

pub mod model;
pub mod view;

pub use model::{ControlError, State};
pub use view::draw;

pub const RING_THICKNESS: f64 = 30.0;
pub const MARKER_LENGTH: f64 = 6.0;
pub const MAIN_MARKER_LENGTH: f64 = 12.0;
pub const MARKER_WIDTH: f64 = 1.5;
pub const HANDLE_BORDER: f64 = 3.0;
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const START_OFFSET: f64 = -PI / 2.0; // dial angles start at 12 o'clock

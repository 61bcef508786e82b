pub mod color;
pub mod geometry;
pub mod group;
pub mod ipc;
pub mod params;
pub mod session;
pub mod slider;
pub mod widget;

pub use geometry::{Bounds, Corner, Point, Rect};
pub use group::{RingInset, SliderGroup};
pub use params::{ConfigError, Params, SliderConfig};
pub use session::{InputSession, ScrollLock};
pub use slider::{ArcFill, ChangeEvent, Frame, Lifecycle, Marker, Slider, SliderChangeListener};
pub use widget::{HostSurface, InputEvent, InputOutcome, Widget};

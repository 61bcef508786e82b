use dial::Point;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};

const LAYER_NAMESPACE: &str = "dials";

/// Pointer position in the surface coordinates of `native`, if the seat has a pointer.
pub fn pointer_position(native: &impl IsA<gtk::Native>) -> Option<Point> {
    let pointer = gdk::Display::default()?.default_seat()?.pointer()?;
    let (x, y, _) = native.surface()?.device_position(&pointer)?;
    Some(Point::new(x, y))
}

/// Turns the window into a fullscreen overlay that does not reserve space.
pub fn init_overlay(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some(LAYER_NAMESPACE));
    window.set_exclusive_zone(-1);
    [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom]
        .into_iter()
        .for_each(|edge| window.set_anchor(edge, true));
    // Escape needs focus only while shown.
    window.set_keyboard_mode(KeyboardMode::OnDemand);
}

/// True if the gesture is driven by a touchscreen rather than a pointer.
pub fn is_touch(gesture: &impl IsA<gtk::Gesture>) -> bool {
    gesture
        .device()
        .is_some_and(|d| d.source() == gdk::InputSource::Touchscreen)
}

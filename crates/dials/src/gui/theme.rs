use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};

const OVERLAY_CSS: &str = "
.dials-window, .dials-drawing-area {
    background: none;
    background-color: transparent;
}
";

pub struct ThemeColors {
    /// Unfilled part of the ring.
    pub track: Srgba<f64>,
    /// Remainder past the arc span of a partial dial.
    pub blank: Srgba<f64>,
    pub handle: Srgba<f64>,
    pub marker: Srgba<f64>,
    pub marker_main: Srgba<f64>,
    /// Used when a dial's color does not parse.
    pub accent: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let themed = |name: &str, fallback: Srgb<f64>, alpha: f64| {
            context
                .lookup_color(name)
                .map(|c| Srgb::new(c.red() as f64, c.green() as f64, c.blue() as f64))
                .unwrap_or(fallback)
                .with_alpha(alpha)
        };

        Self {
            track: themed("theme_unfocused_bg_color", Srgb::new(0.93, 0.93, 0.93), 0.9),
            blank: themed("theme_base_color", Srgb::new(1.0, 1.0, 1.0), 0.6),
            handle: themed("theme_base_color", Srgb::new(1.0, 1.0, 1.0), 1.0),
            marker: themed("theme_fg_color", Srgb::new(0.3, 0.3, 0.3), 0.5),
            marker_main: themed("theme_fg_color", Srgb::new(0.1, 0.1, 0.1), 0.9),
            accent: themed("theme_selected_bg_color", Srgb::new(0.9, 0.2, 0.2), 1.0),
        }
    }
}

/// Makes the overlay window see-through so only the rings are painted.
pub fn load_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display, skipping overlay CSS");
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(OVERLAY_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

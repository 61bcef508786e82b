use super::model::State;
use super::{
    HANDLE_BORDER, LABEL_FONT_SIZE, MAIN_MARKER_LENGTH, MARKER_LENGTH, MARKER_WIDTH,
    RING_THICKNESS, START_OFFSET,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use dial::color::parse_color;
use dial::geometry::HANDLE_RADIUS;
use dial::{Frame, Point, Widget};
use palette::Srgba;
use std::f64::consts::PI;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Cairo angle for a dial angle in degrees (0 = up, clockwise).
fn dial_angle(deg: f64) -> f64 {
    START_OFFSET + deg.to_radians()
}

struct RingRenderer<'a> {
    frame: &'a Frame<'a>,
    colors: &'a ThemeColors,
    center: Point,
    radius: f64,
}

impl<'a> RingRenderer<'a> {
    fn new(frame: &'a Frame<'a>, colors: &'a ThemeColors) -> Self {
        Self {
            frame,
            colors,
            center: frame.rect.center(),
            radius: frame.rect.outer_radius(),
        }
    }

    fn fill_color(&self) -> Srgba<f64> {
        parse_color(self.frame.fill.color()).unwrap_or(self.colors.accent)
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let span = self.frame.fill.span();

        self.draw_wedge(cr, 0.0, span, self.colors.track)?;
        self.draw_wedge(cr, span, 360.0, self.colors.blank)?;
        self.draw_wedge(cr, 0.0, self.frame.fill.deg(), self.fill_color())?;
        self.cut_center(cr)?;
        self.draw_markers(cr)?;
        self.draw_handle(cr)
    }

    fn draw_wedge(
        &self,
        cr: &Context,
        from: f64,
        to: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        if to <= from {
            return Ok(());
        }
        set_source(cr, color);
        cr.move_to(self.center.x, self.center.y);
        cr.arc(
            self.center.x,
            self.center.y,
            self.radius,
            dial_angle(from),
            dial_angle(to),
        );
        cr.close_path();
        cr.fill()
    }

    /// Punches the hole that turns the disc into a ring; inner rings are drawn on top later.
    fn cut_center(&self, cr: &Context) -> Result<(), cairo::Error> {
        let inner = self.radius - RING_THICKNESS;
        if inner <= 0.0 {
            return Ok(());
        }
        cr.save()?;
        cr.set_operator(cairo::Operator::Clear);
        cr.arc(self.center.x, self.center.y, inner, 0.0, 2.0 * PI);
        cr.fill()?;
        cr.restore()
    }

    fn draw_markers(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.set_line_width(MARKER_WIDTH);
        for marker in self.frame.markers {
            let (length, color) = if marker.main {
                (MAIN_MARKER_LENGTH, self.colors.marker_main)
            } else {
                (MARKER_LENGTH, self.colors.marker)
            };
            let angle = dial_angle(marker.angle);
            let (cos, sin) = (angle.cos(), angle.sin());
            let inner = self.radius - length;

            set_source(cr, color);
            cr.move_to(self.center.x + inner * cos, self.center.y + inner * sin);
            cr.line_to(
                self.center.x + self.radius * cos,
                self.center.y + self.radius * sin,
            );
            cr.stroke()?;
        }
        Ok(())
    }

    fn draw_handle(&self, cr: &Context) -> Result<(), cairo::Error> {
        let c = self.frame.handle_center();
        cr.arc(c.x, c.y, HANDLE_RADIUS, 0.0, 2.0 * PI);
        set_source(cr, self.colors.handle);
        cr.fill_preserve()?;
        set_source(cr, self.fill_color());
        cr.set_line_width(HANDLE_BORDER);
        cr.stroke()
    }
}

pub fn draw(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    for frame in state.group.render() {
        RingRenderer::new(&frame, colors).draw(cr)?;
    }
    draw_label(cr, state, colors)
}

/// Name and value of the focused dial, centered in the group.
fn draw_label(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some((label, slider)) = state.focus.and_then(|i| {
        state
            .label(i)
            .zip(state.group.sliders().get(i))
            .filter(|(_, s)| s.is_active())
    }) else {
        return Ok(());
    };

    let text = format!("{} {}", label, slider.value());
    let center = state.group.host().center();

    set_source(cr, colors.marker_main);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(LABEL_FONT_SIZE);
    if let Ok(ext) = cr.text_extents(&text) {
        cr.move_to(center.x - ext.width() / 2.0, center.y + ext.height() / 2.0);
        cr.show_text(&text)?;
    }
    Ok(())
}

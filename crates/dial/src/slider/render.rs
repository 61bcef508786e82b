use crate::geometry::{Bounds, Corner, HANDLE_RADIUS, Point, Rect};
use crate::params::{MAX_RADIUS, Params};

pub const TRACK_COLOR: &str = "#eee";
pub const BLANK_COLOR: &str = "white";

/// Progress fill of the ring, swept clockwise from the top.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcFill {
    /// Full-circle dial: progress then track.
    Full { color: String, deg: f64 },
    /// Partial dial: progress, track up to `radius`, blank remainder.
    Partial {
        color: String,
        deg: f64,
        radius: f64,
    },
}

impl ArcFill {
    pub fn new(params: &Params, corner: &Corner) -> Self {
        if params.radius < MAX_RADIUS {
            Self::Partial {
                color: params.color.clone(),
                deg: corner.deg,
                radius: params.radius,
            }
        } else {
            Self::Full {
                color: params.color.clone(),
                deg: corner.deg,
            }
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Self::Full { color, .. } | Self::Partial { color, .. } => color,
        }
    }

    pub fn deg(&self) -> f64 {
        match self {
            Self::Full { deg, .. } | Self::Partial { deg, .. } => *deg,
        }
    }

    /// End of the track in degrees; the rest of the circle is blank.
    pub fn span(&self) -> f64 {
        match self {
            Self::Full { .. } => MAX_RADIUS,
            Self::Partial { radius, .. } => *radius,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Full { color, deg } => {
                format!("conic-gradient({color} {deg}deg, {TRACK_COLOR} 0)")
            }
            Self::Partial { color, deg, radius } => format!(
                "conic-gradient({color} {deg}deg, {TRACK_COLOR} {deg}deg, {TRACK_COLOR} {radius}deg, {BLANK_COLOR} {radius}deg)"
            ),
        }
    }
}

/// Tick mark rotated `angle` degrees clockwise from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub angle: f64,
    pub main: bool,
}

/// One tick per step boundary; the two ends are emphasized.
pub fn build_markers(params: &Params) -> Vec<Marker> {
    let count = (params.range() / params.step).floor() as usize;
    if count == 0 {
        return Vec::new();
    }
    let spacing = params.radius / count as f64;

    (0..=count)
        .map(|i| Marker {
            angle: spacing * i as f64,
            main: i == 0 || i == count,
        })
        .collect()
}

/// Handle top-left relative to the slider box.
pub fn handle_offset(bounds: &Bounds, corner: &Corner) -> Point {
    Point::new(
        (corner.tan.cos() + 1.0) * bounds.width / 2.0 - HANDLE_RADIUS,
        (corner.tan.sin() + 1.0) * bounds.height / 2.0 - HANDLE_RADIUS,
    )
}

/// Everything needed to paint one slider.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub rect: Rect,
    pub fill: ArcFill,
    pub handle: Point,
    pub markers: &'a [Marker],
}

impl Frame<'_> {
    pub fn handle_center(&self) -> Point {
        self.rect
            .origin()
            .offset(self.handle.x + HANDLE_RADIUS, self.handle.y + HANDLE_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max: f64, step: f64, radius: f64) -> Params {
        Params {
            max,
            step,
            radius,
            ..Default::default()
        }
    }

    #[test]
    fn test_css_forms() {
        let corner = Corner {
            deg: 90.0,
            ..Default::default()
        };
        assert_eq!(
            ArcFill::new(&params(100.0, 1.0, 360.0), &corner).to_css(),
            "conic-gradient(red 90deg, #eee 0)"
        );
        assert_eq!(
            ArcFill::new(&params(100.0, 1.0, 270.0), &corner).to_css(),
            "conic-gradient(red 90deg, #eee 90deg, #eee 270deg, white 270deg)"
        );
    }

    #[test]
    fn test_markers_span_radius_with_main_ends() {
        let markers = build_markers(&params(100.0, 25.0, 180.0));
        let angles: Vec<f64> = markers.iter().map(|m| m.angle).collect();
        assert_eq!(angles, vec![0.0, 45.0, 90.0, 135.0, 180.0]);

        let mains: Vec<bool> = markers.iter().map(|m| m.main).collect();
        assert_eq!(mains, vec![true, false, false, false, true]);
    }

    #[test]
    fn test_markers_floor_partial_steps() {
        assert_eq!(build_markers(&params(10.0, 3.0, 360.0)).len(), 4);
    }

    #[test]
    fn test_handle_sits_on_top_at_zero() {
        let bounds = Bounds::from_rect(Rect::new(0.0, 0.0, 206.0, 206.0));
        let handle = handle_offset(&bounds, &Corner::default());
        assert!((handle.x - 85.0).abs() < 1e-9);
        assert!((handle.y + 15.0).abs() < 1e-9);
    }
}

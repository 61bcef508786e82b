use palette::{Srgb, Srgba, WithAlpha, named};

/// Resolves a CSS-style color: `#rgb`, `#rrggbb` or a named color.
pub fn parse_color(raw: &str) -> Option<Srgba<f64>> {
    let raw = raw.trim();
    let rgb: Srgb<u8> = if raw.starts_with('#') {
        raw.parse().ok()?
    } else {
        named::from_str(&raw.to_ascii_lowercase())?
    };
    Some(rgb.into_format::<f64>().with_alpha(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        let cases = vec![
            ("red", Some((1.0, 0.0, 0.0))),
            ("Red", Some((1.0, 0.0, 0.0))),
            ("#00ff00", Some((0.0, 1.0, 0.0))),
            ("#fff", Some((1.0, 1.0, 1.0))),
            ("not-a-color", None),
            ("#zzzzzz", None),
        ];

        for (raw, expected) in cases {
            let parsed = parse_color(raw).map(|c| (c.red, c.green, c.blue));
            assert_eq!(parsed, expected, "{raw}");
        }
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const DEFAULT_COLOR: &str = "red";
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 100.0;
pub const DEFAULT_STEP: f64 = 1.0;
pub const DEFAULT_RADIUS: f64 = 360.0;
pub const MIN_RADIUS: f64 = 1.0;
pub const MAX_RADIUS: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("Min value {min} shouldn't be greater than max value {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("Step {step} should be greater than 0 and not exceed the slider range {range}")]
    InvalidStep { step: f64, range: f64 },
    #[error("Value {value} should be between minimum {min} and maximum {max}")]
    OutOfRangeValue { value: f64, min: f64, max: f64 },
    #[error("Radius {radius} should be between 1 and 360")]
    InvalidRadius { radius: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("Unknown slider attribute '{0}'")]
    Unknown(String),
}

/// Names accepted by [`SliderConfig::set_attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Attribute {
    Color,
    Min,
    Max,
    Step,
    Radius,
    Value,
    Markers,
}

/// User-facing slider configuration. Absent fields fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default = "default_markers")]
    pub markers: bool,
}

fn default_markers() -> bool {
    true
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            color: None,
            min: None,
            max: None,
            step: None,
            radius: None,
            value: None,
            markers: true,
        }
    }
}

impl SliderConfig {
    /// Applies a single `name=raw` attribute. Unreadable numbers unset the field.
    pub fn set_attribute(&mut self, name: &str, raw: &str) -> Result<(), AttributeError> {
        let attribute: Attribute = name
            .trim()
            .parse()
            .map_err(|_| AttributeError::Unknown(name.to_string()))?;

        match attribute {
            Attribute::Color => {
                self.color = Some(raw.trim().to_string()).filter(|c| !c.is_empty());
            }
            Attribute::Markers => {
                self.markers = !matches!(raw.trim(), "false" | "0" | "no" | "off");
            }
            Attribute::Min => self.min = parse_number(attribute, raw),
            Attribute::Max => self.max = parse_number(attribute, raw),
            Attribute::Step => self.step = parse_number(attribute, raw),
            Attribute::Radius => self.radius = parse_number(attribute, raw),
            Attribute::Value => self.value = parse_number(attribute, raw),
        }
        Ok(())
    }

    pub fn with_attributes<'a>(
        mut self,
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, AttributeError> {
        for (name, raw) in attributes {
            self.set_attribute(name, raw)?;
        }
        Ok(self)
    }
}

fn parse_number(attribute: Attribute, raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    if parsed.is_none() {
        log::warn!(
            "Unreadable {} attribute '{}', falling back to default",
            attribute,
            raw
        );
    }
    parsed
}

/// Resolved slider parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub color: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub radius: f64,
    pub value: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self::from_config(&SliderConfig::default())
    }
}

impl Params {
    pub fn from_config(config: &SliderConfig) -> Self {
        let min = config.min.unwrap_or(DEFAULT_MIN);
        Self {
            color: config
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            min,
            max: config.max.unwrap_or(DEFAULT_MAX),
            step: config.step.unwrap_or(DEFAULT_STEP),
            radius: config.radius.unwrap_or(DEFAULT_RADIUS),
            value: config.value.unwrap_or(min),
        }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks the invariants in order and reports the first one broken.
    /// Comparisons are negated so NaN never passes.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min <= self.max) {
            return Err(ConfigError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.step > 0.0 && self.step <= self.range()) {
            return Err(ConfigError::InvalidStep {
                step: self.step,
                range: self.range(),
            });
        }
        if !self.contains(self.value) {
            return Err(ConfigError::OutOfRangeValue {
                value: self.value,
                min: self.min,
                max: self.max,
            });
        }
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&self.radius) {
            return Err(ConfigError::InvalidRadius {
                radius: self.radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min: f64, max: f64, step: f64, radius: f64, value: f64) -> Params {
        Params {
            color: DEFAULT_COLOR.to_string(),
            min,
            max,
            step,
            radius,
            value,
        }
    }

    #[test]
    fn test_defaults_apply_to_missing_fields() {
        let p = Params::from_config(&SliderConfig {
            min: Some(10.0),
            ..Default::default()
        });
        assert_eq!(p.color, "red");
        assert_eq!(p.max, 100.0);
        assert_eq!(p.step, 1.0);
        assert_eq!(p.radius, 360.0);
        assert_eq!(p.value, 10.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation_reports_first_violation() {
        let cases = vec![
            (
                params(10.0, 5.0, -1.0, 0.0, 20.0),
                ConfigError::InvalidRange {
                    min: 10.0,
                    max: 5.0,
                },
            ),
            (
                params(0.0, 10.0, 20.0, 0.0, 20.0),
                ConfigError::InvalidStep {
                    step: 20.0,
                    range: 10.0,
                },
            ),
            (
                params(0.0, 10.0, 0.0, 360.0, 5.0),
                ConfigError::InvalidStep {
                    step: 0.0,
                    range: 10.0,
                },
            ),
            (
                params(0.0, 10.0, 1.0, 0.0, 11.0),
                ConfigError::OutOfRangeValue {
                    value: 11.0,
                    min: 0.0,
                    max: 10.0,
                },
            ),
            (
                params(0.0, 10.0, 1.0, 361.0, 5.0),
                ConfigError::InvalidRadius { radius: 361.0 },
            ),
        ];

        for (p, expected) in cases {
            assert_eq!(p.validate(), Err(expected));
        }
    }

    #[test]
    fn test_nan_never_validates() {
        assert!(params(f64::NAN, 10.0, 1.0, 360.0, 5.0).validate().is_err());
        assert!(params(0.0, 10.0, f64::NAN, 360.0, 5.0).validate().is_err());
        assert!(params(0.0, 10.0, 1.0, f64::NAN, 5.0).validate().is_err());
    }

    #[test]
    fn test_set_attribute_falls_back_on_garbage() {
        let config = SliderConfig::default()
            .with_attributes([("max", "250"), ("STEP", "5"), ("min", "abc")])
            .unwrap();
        assert_eq!(config.max, Some(250.0));
        assert_eq!(config.step, Some(5.0));
        assert_eq!(config.min, None);

        let config = config
            .with_attributes([("markers", "off"), ("color", " #00ff00 ")])
            .unwrap();
        assert!(!config.markers);
        assert_eq!(config.color.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_set_attribute_rejects_unknown_name() {
        let mut config = SliderConfig::default();
        assert_eq!(
            config.set_attribute("@change", "onDial"),
            Err(AttributeError::Unknown("@change".to_string()))
        );
    }

    #[test]
    fn test_config_deserialization() {
        let config: SliderConfig =
            serde_json::from_str(r##"{"color": "#123456", "max": 50, "radius": 270}"##).unwrap();
        assert_eq!(config.max, Some(50.0));
        assert_eq!(config.radius, Some(270.0));
        assert_eq!(config.min, None);
        assert!(config.markers);
    }
}

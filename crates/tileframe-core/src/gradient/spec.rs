//! Gradient background description and its editing operations.
//!
//! A [`GradientSpec`] is an immutable value: every edit returns a new spec, so
//! the paint builder stays a pure function of its input.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Minimum number of color stops in a gradient.
pub const MIN_STOPS: usize = 2;

/// Maximum number of color stops in a gradient.
pub const MAX_STOPS: usize = 4;

/// Distance between the last stop and a newly added one, in percent.
const ADD_STOP_SPACING: f64 = 25.0;

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// Colors change along an axis at `angle` degrees
    #[default]
    Linear,
    /// Colors change with distance from the center
    Radial,
}

/// A color transition point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// CSS hex color, e.g. `#ffffff`
    pub color: String,
    /// Position along the gradient, 0 to 100
    pub position: f64,
}

impl GradientStop {
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }
}

/// Background gradient configuration.
///
/// Stops are kept in the order the user created them; consumers that need
/// them ordered by position use [`GradientSpec::sorted_stops`]. Deserializing
/// checks the stop count like [`GradientSpec::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradientSpec")]
pub struct GradientSpec {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    /// Axis angle in degrees (linear only). 0 points right, 90 points down.
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

/// Wire shape of a [`GradientSpec`] before the stop count is checked.
#[derive(Deserialize)]
struct RawGradientSpec {
    #[serde(rename = "type")]
    kind: GradientKind,
    angle: f64,
    stops: Vec<GradientStop>,
}

impl TryFrom<RawGradientSpec> for GradientSpec {
    type Error = ConfigurationError;

    fn try_from(raw: RawGradientSpec) -> Result<Self, Self::Error> {
        Self::new(raw.kind, raw.angle, raw.stops)
    }
}

impl Default for GradientSpec {
    /// Linear, top to bottom, white to black.
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            angle: 90.0,
            stops: vec![
                GradientStop::new("#ffffff", 0.0),
                GradientStop::new("#000000", 100.0),
            ],
        }
    }
}

impl GradientSpec {
    /// Create a gradient, checking the stop count is within `MIN_STOPS..=MAX_STOPS`.
    pub fn new(
        kind: GradientKind,
        angle: f64,
        stops: Vec<GradientStop>,
    ) -> Result<Self, ConfigurationError> {
        check_stop_count(stops.len())?;
        Ok(Self { kind, angle, stops })
    }

    /// Same gradient with a different geometry.
    pub fn with_kind(&self, kind: GradientKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Same gradient with a different angle.
    pub fn with_angle(&self, angle: f64) -> Self {
        Self {
            angle,
            ..self.clone()
        }
    }

    /// Replace the stop at `index`.
    pub fn with_stop(&self, index: usize, stop: GradientStop) -> Result<Self, ConfigurationError> {
        let len = self.stops.len();
        let mut stops = self.stops.clone();
        let slot = stops
            .get_mut(index)
            .ok_or(ConfigurationError::StopIndexOutOfRange { index, len })?;
        *slot = stop;
        Ok(Self {
            stops,
            ..self.clone()
        })
    }

    /// Append a white stop 25% after the last stop (capped at 100).
    pub fn add_stop(&self) -> Result<Self, ConfigurationError> {
        if self.stops.len() >= MAX_STOPS {
            return Err(ConfigurationError::TooManyStops {
                max: MAX_STOPS,
                actual: self.stops.len() + 1,
            });
        }
        let last = self
            .stops
            .last()
            .ok_or(ConfigurationError::TooFewStops {
                min: MIN_STOPS,
                actual: 0,
            })?;

        let mut stops = self.stops.clone();
        stops.push(GradientStop::new(
            "#ffffff",
            (last.position + ADD_STOP_SPACING).min(100.0),
        ));
        Ok(Self {
            stops,
            ..self.clone()
        })
    }

    /// Remove the stop at `index`, refusing to go below `MIN_STOPS`.
    pub fn remove_stop(&self, index: usize) -> Result<Self, ConfigurationError> {
        let len = self.stops.len();
        if len <= MIN_STOPS {
            return Err(ConfigurationError::TooFewStops {
                min: MIN_STOPS,
                actual: len.saturating_sub(1),
            });
        }
        if index >= len {
            return Err(ConfigurationError::StopIndexOutOfRange { index, len });
        }
        let mut stops = self.stops.clone();
        stops.remove(index);
        Ok(Self {
            stops,
            ..self.clone()
        })
    }

    /// Stops ordered by ascending position. Equal positions keep their
    /// original relative order.
    pub fn sorted_stops(&self) -> Vec<GradientStop> {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        stops
    }

    /// CSS `background` value for a small preview swatch.
    pub fn to_css(&self) -> String {
        let stops = self
            .sorted_stops()
            .iter()
            .map(|s| format!("{} {}%", s.color, s.position))
            .collect::<Vec<_>>()
            .join(", ");

        match self.kind {
            GradientKind::Linear => format!("linear-gradient({}deg, {})", self.angle, stops),
            GradientKind::Radial => format!("radial-gradient(circle, {})", stops),
        }
    }
}

pub(crate) fn check_stop_count(count: usize) -> Result<(), ConfigurationError> {
    if count < MIN_STOPS {
        return Err(ConfigurationError::TooFewStops {
            min: MIN_STOPS,
            actual: count,
        });
    }
    if count > MAX_STOPS {
        return Err(ConfigurationError::TooManyStops {
            max: MAX_STOPS,
            actual: count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_stops() -> GradientSpec {
        GradientSpec::new(
            GradientKind::Linear,
            45.0,
            vec![
                GradientStop::new("#ff0000", 80.0),
                GradientStop::new("#00ff00", 10.0),
                GradientStop::new("#0000ff", 50.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_spec() {
        let spec = GradientSpec::default();
        assert_eq!(spec.kind, GradientKind::Linear);
        assert_eq!(spec.angle, 90.0);
        assert_eq!(spec.stops.len(), 2);
    }

    #[test]
    fn test_new_checks_stop_count() {
        let one = vec![GradientStop::new("#fff", 0.0)];
        assert!(matches!(
            GradientSpec::new(GradientKind::Linear, 0.0, one),
            Err(ConfigurationError::TooFewStops { actual: 1, .. })
        ));

        let five = vec![GradientStop::new("#fff", 0.0); 5];
        assert!(matches!(
            GradientSpec::new(GradientKind::Radial, 0.0, five),
            Err(ConfigurationError::TooManyStops { actual: 5, .. })
        ));
    }

    #[test]
    fn test_sorted_stops() {
        let positions: Vec<f64> = three_stops()
            .sorted_stops()
            .iter()
            .map(|s| s.position)
            .collect();
        assert_eq!(positions, [10.0, 50.0, 80.0]);
    }

    #[test]
    fn test_sorted_stops_is_stable() {
        let spec = GradientSpec::new(
            GradientKind::Linear,
            0.0,
            vec![
                GradientStop::new("#111111", 50.0),
                GradientStop::new("#222222", 50.0),
            ],
        )
        .unwrap();
        let sorted = spec.sorted_stops();
        assert_eq!(sorted[0].color, "#111111");
        assert_eq!(sorted[1].color, "#222222");
    }

    #[test]
    fn test_edits_return_new_values() {
        let spec = GradientSpec::default();
        let radial = spec.with_kind(GradientKind::Radial);
        let rotated = spec.with_angle(180.0);

        assert_eq!(spec.kind, GradientKind::Linear);
        assert_eq!(radial.kind, GradientKind::Radial);
        assert_eq!(spec.angle, 90.0);
        assert_eq!(rotated.angle, 180.0);
    }

    #[test]
    fn test_with_stop() {
        let spec = GradientSpec::default();
        let edited = spec.with_stop(1, GradientStop::new("#3b82f6", 60.0)).unwrap();
        assert_eq!(edited.stops[1].color, "#3b82f6");
        assert_eq!(spec.stops[1].color, "#000000");

        assert!(matches!(
            spec.with_stop(2, GradientStop::new("#fff", 0.0)),
            Err(ConfigurationError::StopIndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_add_stop_positions() {
        let spec = GradientSpec::default()
            .with_stop(1, GradientStop::new("#000000", 50.0))
            .unwrap();
        let added = spec.add_stop().unwrap();
        assert_eq!(added.stops.len(), 3);
        assert_eq!(added.stops[2], GradientStop::new("#ffffff", 75.0));

        // Last stop already at 100: new stop is capped
        let capped = GradientSpec::default().add_stop().unwrap();
        assert_eq!(capped.stops[2].position, 100.0);
    }

    #[test]
    fn test_add_stop_limit() {
        let full = GradientSpec::default().add_stop().unwrap().add_stop().unwrap();
        assert_eq!(full.stops.len(), MAX_STOPS);
        assert!(matches!(
            full.add_stop(),
            Err(ConfigurationError::TooManyStops { .. })
        ));
    }

    #[test]
    fn test_remove_stop() {
        let spec = three_stops();
        let removed = spec.remove_stop(0).unwrap();
        assert_eq!(removed.stops.len(), 2);
        assert_eq!(removed.stops[0].color, "#00ff00");

        assert!(matches!(
            removed.remove_stop(0),
            Err(ConfigurationError::TooFewStops { .. })
        ));
        assert!(matches!(
            spec.remove_stop(3),
            Err(ConfigurationError::StopIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_to_css() {
        assert_eq!(
            GradientSpec::default().to_css(),
            "linear-gradient(90deg, #ffffff 0%, #000000 100%)"
        );
        assert_eq!(
            three_stops().with_kind(GradientKind::Radial).to_css(),
            "radial-gradient(circle, #00ff00 10%, #0000ff 50%, #ff0000 80%)"
        );
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&GradientSpec::default()).unwrap();
        assert!(json.contains(r#""type":"linear""#));

        let spec: GradientSpec = serde_json::from_str(
            r##"{"type":"radial","angle":0,"stops":[{"color":"#000","position":0},{"color":"#fff","position":100}]}"##,
        )
        .unwrap();
        assert_eq!(spec.kind, GradientKind::Radial);
    }

    #[test]
    fn test_deserialize_checks_stop_count() {
        let stop = r##"{"color":"#000","position":0}"##;
        let with_stops = |n: usize| {
            format!(
                r#"{{"type":"linear","angle":90,"stops":[{}]}}"#,
                vec![stop; n].join(",")
            )
        };

        let err = serde_json::from_str::<GradientSpec>(&with_stops(1)).unwrap_err();
        assert!(err.to_string().contains("at least 2"), "{}", err);
        let err = serde_json::from_str::<GradientSpec>(&with_stops(5)).unwrap_err();
        assert!(err.to_string().contains("at most 4"), "{}", err);

        for n in MIN_STOPS..=MAX_STOPS {
            let spec: GradientSpec = serde_json::from_str(&with_stops(n)).unwrap();
            assert_eq!(spec.stops.len(), n);
        }
    }
}

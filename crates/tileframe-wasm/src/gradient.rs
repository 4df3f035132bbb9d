//! Gradient builder WASM bindings.
//!
//! Wraps the core `GradientSpec` so the background editor can add, remove
//! and recolor stops from TypeScript and pass the result to an export.

use tileframe_core::gradient::{GradientKind, GradientSpec, GradientStop, MAX_STOPS, MIN_STOPS};
use wasm_bindgen::prelude::*;

use crate::types::to_js_error;

/// Background gradient wrapper for JavaScript
#[wasm_bindgen]
pub struct JsGradient {
    inner: GradientSpec,
}

#[wasm_bindgen]
impl JsGradient {
    /// Linear, top to bottom, white to black
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: GradientSpec::default(),
        }
    }

    /// `"linear"` or `"radial"`
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        match self.inner.kind {
            GradientKind::Linear => "linear".to_string(),
            GradientKind::Radial => "radial".to_string(),
        }
    }

    /// Set the geometry; anything other than `"radial"` means linear
    #[wasm_bindgen(setter)]
    pub fn set_kind(&mut self, value: &str) {
        let kind = if value.eq_ignore_ascii_case("radial") {
            GradientKind::Radial
        } else {
            GradientKind::Linear
        };
        self.inner = self.inner.with_kind(kind);
    }

    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.angle
    }

    #[wasm_bindgen(setter)]
    pub fn set_angle(&mut self, value: f64) {
        self.inner = self.inner.with_angle(value);
    }

    #[wasm_bindgen(getter, js_name = stopCount)]
    pub fn stop_count(&self) -> usize {
        self.inner.stops.len()
    }

    #[wasm_bindgen(js_name = canAddStop)]
    pub fn can_add_stop(&self) -> bool {
        self.inner.stops.len() < MAX_STOPS
    }

    #[wasm_bindgen(js_name = canRemoveStop)]
    pub fn can_remove_stop(&self) -> bool {
        self.inner.stops.len() > MIN_STOPS
    }

    /// Replace the stop at `index` with a color and a 0-100 position
    #[wasm_bindgen(js_name = setStop)]
    pub fn set_stop(&mut self, index: usize, color: &str, position: f64) -> Result<(), JsValue> {
        self.inner = self
            .inner
            .with_stop(index, GradientStop::new(color, position))
            .map_err(to_js_error)?;
        Ok(())
    }

    /// Append a white stop after the last one
    #[wasm_bindgen(js_name = addStop)]
    pub fn add_stop(&mut self) -> Result<(), JsValue> {
        self.inner = self.inner.add_stop().map_err(to_js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = removeStop)]
    pub fn remove_stop(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner = self.inner.remove_stop(index).map_err(to_js_error)?;
        Ok(())
    }

    /// CSS `background` value for the preview swatch
    #[wasm_bindgen(js_name = toCss)]
    pub fn to_css(&self) -> String {
        self.inner.to_css()
    }

    /// Serialize to a plain object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain object
    pub fn from_json(value: JsValue) -> Result<JsGradient, JsValue> {
        let inner: GradientSpec = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl Default for JsGradient {
    fn default() -> Self {
        Self::new()
    }
}

impl JsGradient {
    pub(crate) fn spec(&self) -> &GradientSpec {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let gradient = JsGradient::new();
        assert_eq!(gradient.kind(), "linear");
        assert_eq!(gradient.angle(), 90.0);
        assert_eq!(gradient.stop_count(), 2);
        assert!(gradient.can_add_stop());
        assert!(!gradient.can_remove_stop());
    }

    #[test]
    fn test_kind_and_angle() {
        let mut gradient = JsGradient::new();
        gradient.set_kind("Radial");
        assert_eq!(gradient.kind(), "radial");
        gradient.set_kind("anything");
        assert_eq!(gradient.kind(), "linear");
        gradient.set_angle(45.0);
        assert_eq!(gradient.angle(), 45.0);
    }

    #[test]
    fn test_stop_editing() {
        let mut gradient = JsGradient::new();
        gradient.add_stop().unwrap();
        gradient.add_stop().unwrap();
        assert_eq!(gradient.stop_count(), 4);
        assert!(!gradient.can_add_stop());

        gradient.set_stop(0, "#ff0000", 10.0).unwrap();
        gradient.remove_stop(3).unwrap();
        assert_eq!(gradient.stop_count(), 3);
        assert_eq!(gradient.spec().stops[0].color, "#ff0000");
        assert_eq!(gradient.spec().stops[0].position, 10.0);
    }

    #[test]
    fn test_to_css() {
        let gradient = JsGradient::new();
        assert_eq!(
            gradient.to_css(),
            "linear-gradient(90deg, #ffffff 0%, #000000 100%)"
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_add_stop_past_limit_errors() {
        let mut gradient = JsGradient::new();
        gradient.add_stop().unwrap();
        gradient.add_stop().unwrap();
        assert!(gradient.add_stop().is_err());
    }

    #[wasm_bindgen_test]
    fn test_remove_below_minimum_errors() {
        let mut gradient = JsGradient::new();
        assert!(gradient.remove_stop(0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_json_round_trip() {
        let mut gradient = JsGradient::new();
        gradient.set_kind("radial");
        let value = gradient.to_json().unwrap();
        let restored = JsGradient::from_json(value).unwrap();
        assert_eq!(restored.kind(), "radial");
        assert_eq!(restored.stop_count(), 2);
    }

    #[wasm_bindgen_test]
    fn test_from_json_rejects_garbage() {
        let value = serde_wasm_bindgen::to_value(&42).unwrap();
        assert!(JsGradient::from_json(value).is_err());
    }

    #[wasm_bindgen_test]
    fn test_from_json_rejects_five_stops() {
        let mut spec = tileframe_core::GradientSpec::default();
        spec.stops = vec![tileframe_core::GradientStop::new("#000000", 0.0); 5];
        let value = serde_wasm_bindgen::to_value(&spec).unwrap();
        assert!(JsGradient::from_json(value).is_err());
    }
}
